use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    bits-migrate completions bash > ~/.bash_completion.d/bits-migrate\n\n\
                  Generate zsh completions:\n    bits-migrate completions zsh > ~/.zfunc/_bits-migrate\n\n\
                  Generate fish completions:\n    bits-migrate completions fish > ~/.config/fish/completions/bits-migrate.fish\n\n\
                  Generate PowerShell completions:\n    bits-migrate completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
