use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    sprout completions bash > ~/.bash_completion.d/sprout\n\n\
                  Generate zsh completions:\n    sprout completions zsh > ~/.zfunc/_sprout\n\n\
                  Generate fish completions:\n    sprout completions fish > ~/.config/fish/completions/sprout.fish\n\n\
                  Generate PowerShell completions:\n    sprout completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
