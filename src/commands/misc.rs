use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

pub fn display_banner() {
    println!("gitfolio {}\n", env!("CARGO_PKG_VERSION"));
    let mut cmd = crate::Cli::command();
    let _ = cmd.print_help();
    println!();
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = crate::Cli::command();
    generate(shell, &mut cmd, "gitfolio", &mut io::stdout());

    eprintln!();
    eprintln!("Save the output to the appropriate location for your shell:");
    match shell {
        Shell::Bash => {
            eprintln!("  gitfolio completions bash > ~/.local/share/bash-completion/completions/gitfolio");
        }
        Shell::Zsh => {
            eprintln!("  gitfolio completions zsh > ~/.zsh/completions/_gitfolio");
            eprintln!("  # (Add 'fpath=(~/.zsh/completions $fpath)' before 'compinit' in .zshrc)");
        }
        Shell::Fish => {
            eprintln!("  gitfolio completions fish > ~/.config/fish/completions/gitfolio.fish");
        }
        _ => {}
    }
}
