//! Release verification CLI
//!
//! Usage:
//!   reltool sha256 <file>                Print a file's streaming digest
//!   reltool verify <file>                Verify a file against <file>.sha256
//!   reltool download <url> <dst>         Download, optionally checksum-verified
//!   reltool patch <file> <pat> <repl>    In-place regex patch
//!   reltool check-tag <tag>              Verify a release tag against HEAD
//!   reltool verify-clean                 Require a clean git checkout
//!   reltool fetch-tags                   Error-checked tag fetch
//!   reltool make-var <name>              Print a Makefile variable
//!   reltool run-logged <name> -- <cmd>   Run a command with a log file

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand};
use release_toolkit::cmd::SystemExec;
use release_toolkit::download::HttpClient;
use release_toolkit::{checksum, cmd, download, git, logged, make, output, patch};

#[derive(Parser)]
#[command(name = "reltool")]
#[command(about = "Checksum-verified downloads and repository state checks for releases")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SHA-256 digest of a file
    Sha256 {
        /// File to hash
        file: PathBuf,
    },

    /// Verify a file against its .sha256 sidecar file
    Verify {
        /// File whose sidecar to check
        file: PathBuf,
    },

    /// Download a URL to a local path
    Download {
        /// Source URL
        url: String,

        /// Destination path
        dst: PathBuf,

        /// Fetch <url>.sha256 first and skip the download if the local file
        /// already matches it
        #[arg(long)]
        verify: bool,
    },

    /// Apply a regex replacement to a file in place
    Patch {
        /// File to rewrite
        file: PathBuf,

        /// Regex pattern to search for
        pattern: String,

        /// Replacement text ($1, ${name} refer to capture groups)
        replacement: String,
    },

    /// Check that a tag names a release and points at the current commit
    CheckTag {
        /// Tag name, e.g. v4.12.1
        tag: String,
    },

    /// Check that the current directory is a clean git root
    VerifyClean,

    /// Fetch all tags from the configured remote
    FetchTags,

    /// Print the value of a Makefile variable (via the print-<name> target)
    MakeVar {
        /// Variable name
        name: String,
    },

    /// Run a command with stdout and stderr captured to ../<name>.log
    RunLogged {
        /// Log file stem
        name: String,

        /// Message used in the failure report (defaults to the log stem)
        #[arg(short, long)]
        message: Option<String>,

        /// Command and arguments
        #[arg(last = true, required = true)]
        args: Vec<String>,
    },
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let exec = SystemExec;

    match cli.command {
        Commands::Sha256 { file } => {
            let digest = checksum::sha256file(&file)
                .with_context(|| format!("cannot hash {}", file.display()))?;
            println!("{digest}");
        }

        Commands::Verify { file } => {
            checksum::verify_via_checksumfile(&file)?;
            output::notice(&format!("{} matches its checksum file", file.display()));
        }

        Commands::Download { url, dst, verify } => {
            if verify {
                download::download_with_sha256(&HttpClient, &url, &dst)?;
            } else {
                download::download(&HttpClient, &url, &dst)?;
            }
        }

        Commands::Patch {
            file,
            pattern,
            replacement,
        } => {
            patch::patchfile(&file, &pattern, &replacement)
                .with_context(|| format!("cannot patch {}", file.display()))?;
        }

        Commands::CheckTag { tag } => {
            cmd::verify_command_available("git")?;
            git::verify_git_repo(&exec)?;
            git::verify_is_possible_release_tag(&tag)?;
            git::check_git_tag_for_release(&exec, &tag)?;
            output::notice(&format!("{tag} is an annotated tag at the current commit"));
        }

        Commands::VerifyClean => {
            cmd::verify_command_available("git")?;
            git::verify_git_repo(&exec)?;
            git::verify_git_clean(&exec)?;
            output::notice("working tree is clean");
        }

        Commands::FetchTags => {
            cmd::verify_command_available("git")?;
            git::verify_git_repo(&exec)?;
            git::safe_git_fetch_tags(&exec)?;
            output::notice("tags fetched");
        }

        Commands::MakeVar { name } => {
            cmd::verify_command_available("make")?;
            let value = make::get_makefile_var(&exec, &name)?;
            println!("{value}");
        }

        Commands::RunLogged {
            name,
            message,
            args,
        } => {
            ensure!(!args.is_empty(), "no command given");
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            logged::run_with_log(&exec, &args, &name, message.as_deref())?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    // The one place fatal errors turn into a red message and a non-zero exit.
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
