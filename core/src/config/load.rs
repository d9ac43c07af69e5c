use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default data directory: ~/.taskexport
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".taskexport"))
}

pub fn load_from_str(s: &str) -> anyhow::Result<AppConfig> {
    Ok(toml::from_str::<AppConfig>(s)?)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read {} failed: {e}", path.display()))?;
    load_from_str(&s)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.taskexport/config.toml
    let user_config = get_data_dir()?.join("config.toml");

    // Priority 2: ./config.toml
    let local_config = Path::new("config.toml");

    let mut cfg = if user_config.exists() {
        load_from_path(&user_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    Ok(cfg)
}

/// Environment overrides (highest priority). `lookup` is injected so tests do not
/// have to mutate the process environment.
pub fn apply_env_overrides(
    cfg: &mut AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("TASKEXPORT_API_BASE_URL") {
        cfg.api.rest_base_url = v;
    }
    if let Some(v) = non_empty("TASKEXPORT_ARCHIVE_URL") {
        cfg.api.archive_url = v;
    }
    if let Some(v) = non_empty("TASKEXPORT_MAX_CONCURRENCY") {
        cfg.aggregation.max_concurrency = v
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("TASKEXPORT_MAX_CONCURRENCY={v:?}: {e}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults_when_empty() {
        let cfg = load_from_str("").unwrap();
        assert_eq!(cfg.aggregation.max_concurrency, 10);
        assert_eq!(cfg.aggregation.max_rounds, None);
        assert_eq!(cfg.api.page_limit, 100);
        assert_eq!(cfg.api.timeout_ms, 30_000);
        assert!(cfg.logging.enabled);
    }

    #[test]
    fn test_partial_sections() {
        let cfg = load_from_str(
            r#"
            [aggregation]
            max_rounds = 32

            [api]
            archive_url = "http://localhost:9000/archive"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.aggregation.max_rounds, Some(32));
        assert_eq!(cfg.aggregation.max_concurrency, 10);
        assert_eq!(cfg.api.archive_url, "http://localhost:9000/archive");
        assert_eq!(cfg.api.rest_base_url, "https://api.todoist.com/api/v1");
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"\nfile = true").unwrap();
        let cfg = load_from_path(file.path()).unwrap();
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.logging.file);
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_path(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("TASKEXPORT_API_BASE_URL", "http://rest"),
            ("TASKEXPORT_ARCHIVE_URL", "  "),
            ("TASKEXPORT_MAX_CONCURRENCY", "4"),
        ]);
        let mut cfg = AppConfig::default();
        apply_env_overrides(&mut cfg, |k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.api.rest_base_url, "http://rest");
        assert_eq!(
            cfg.api.archive_url,
            "https://api.todoist.com/api/v9.223/archive/items"
        );
        assert_eq!(cfg.aggregation.max_concurrency, 4);
    }

    #[test]
    fn test_env_override_rejects_bad_number() {
        let mut cfg = AppConfig::default();
        let err = apply_env_overrides(&mut cfg, |k| {
            (k == "TASKEXPORT_MAX_CONCURRENCY").then(|| "many".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("TASKEXPORT_MAX_CONCURRENCY"));
    }
}
