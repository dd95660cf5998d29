use clap::Parser;

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show module information:\n    sprout show telemetry\n\n\
                  Show with verbose output:\n    sprout show telemetry -v")]
pub struct ShowArgs {
    /// Module name to show
    pub module: String,
}
