use clap::Parser;

/// Arguments for the refresh command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Refresh every placed module:\n    sprout refresh\n\n\
                  Refresh a single module:\n    sprout refresh --module telemetry")]
pub struct RefreshArgs {
    /// Refresh only the named module
    #[arg(long, short = 'm', value_name = "NAME")]
    pub module: Option<String>,
}
