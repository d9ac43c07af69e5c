use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "taskexport", version, about = "Export Todoist projects, completed tasks included")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that talks to the API.
#[derive(ClapArgs, Debug, Clone)]
pub struct ProjectArgs {
    #[arg(long)]
    pub project_id: String,

    /// API token; falls back to `TASKEXPORT_TOKEN`.
    #[arg(long, env = "TASKEXPORT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Overrides `aggregation.max_concurrency` from the config file.
    #[arg(long)]
    pub max_concurrency: Option<usize>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[arg(long, default_value_t = false)]
    pub include_completed: bool,

    #[arg(long, default_value_t = false)]
    pub include_sections: bool,

    /// Write the JSON document here instead of stdout.
    #[arg(long)]
    pub output: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CompletedArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print the raw JSON outcome instead of one line per task.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Export(ExportArgs),
    Completed(CompletedArgs),
}
