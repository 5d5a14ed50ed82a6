//! Command line surface
//!
//! Argument parsing lives here rather than in `main.rs` so that the command
//! tree can be exercised from tests through [Args::try_parse_from].

pub mod project_version;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{self, Config};
use crate::store::{FsIniFile, IniVersionStore};
use crate::{clean, report, ui};

#[derive(Parser, Debug)]
#[command(
    name = "unreal-ci",
    version,
    about = "Tools for Unreal CI pipelines",
    long_about = "Tools for Unreal CI pipelines. Commands assume they run in a directory with a .uproject file in it"
)]
pub struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, action = clap::ArgAction::Count, help = "Increase log output (repeat for more)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Commands that help with TeamCity builds
    #[command(name = "teamcity")]
    Teamcity {
        #[command(subcommand)]
        command: TeamcityCommand,
    },

    /// Deletes build files from the project
    #[command(name = "clean")]
    Clean {
        #[command(subcommand)]
        command: CleanCommand,
    },

    /// Parses the UAT tools output json into JUnit XML for CIs
    #[command(name = "jsonToXml")]
    JsonToXml {
        #[arg(short = 'j', long = "jsonFile", help = "Unreal Automation Testing test output json file")]
        json_file: PathBuf,

        #[arg(short = 'o', long = "outPath", help = "Output path of the new JUnit Xml file")]
        out_path: PathBuf,

        #[arg(short = 't', long = "testSuiteName", help = "Test suite name. Optional")]
        test_suite_name: Option<String>,
    },

    /// Sets and gets the current project version from DefaultGame.ini (must be writable)
    #[command(name = "projectVersion")]
    ProjectVersion {
        #[command(subcommand)]
        command: ProjectVersionCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum TeamcityCommand {
    /// Converts Linter V2 output json to a TeamCity report
    #[command(name = "parseLintReport")]
    ParseLintReport {
        #[arg(short = 'j', long = "json", help = "Location of the linter v2 json output")]
        json: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum CleanCommand {
    /// Deletes the given archive/dist folder from the project
    #[command(name = "dist")]
    Dist {
        #[arg(
            short = 'd',
            long = "directory",
            help = "Location of the archive/dist folder to delete. Relative or absolute. Defaults to dist"
        )]
        directory: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectVersionCommand {
    /// Sets the version using perforce style branching. ex - rel0.2, dev0.1, patch4.3 and task9.4
    ///
    /// The ideal usage of this command is to save the current dev and rel versions as separate
    /// vars and then provide them as parameters. The new sem ver version is printed at the end.
    #[command(name = "perforce")]
    Perforce {
        #[arg(short = 'r', long = "relVersion", help = "Current release version of the project")]
        rel_version: String,

        #[arg(short = 'd', long = "devVersion", help = "Current dev version of the project")]
        dev_version: String,

        #[arg(short = 'b', long = "branch", help = "Branch of the build")]
        branch: String,

        #[arg(short = 'i', long = "iniPath", help = "File path to the DefaultGame ini file")]
        ini_path: PathBuf,
    },

    /// Sets the project version to the given string
    #[command(name = "set")]
    Set {
        #[arg(short = 'v', long = "version", help = "Version to set in Project")]
        version: String,

        #[arg(
            short = 'i',
            long = "iniPath",
            help = "File path to the DefaultGame ini file. Defaults to ./Config/DefaultGame.ini"
        )]
        ini_path: Option<PathBuf>,
    },

    /// Prints the current project version
    #[command(name = "get")]
    Get {
        #[arg(
            short = 'i',
            long = "iniPath",
            help = "File path to the DefaultGame ini file. Defaults to ./Config/DefaultGame.ini"
        )]
        ini_path: Option<PathBuf>,
    },
}

fn version_store(path: &Path, config: &Config) -> IniVersionStore<FsIniFile> {
    IniVersionStore::new(FsIniFile::new(path), config.project_version.ini_key())
}

/// Run the parsed command against the loaded configuration.
pub fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    match args.command {
        Command::ProjectVersion { command } => run_project_version(command, &config),
        Command::Teamcity {
            command: TeamcityCommand::ParseLintReport { json },
        } => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            report::parse_lint_report(&json, &mut out)
                .with_context(|| format!("Failed to convert lint report {}", json.display()))?;
            Ok(())
        }
        Command::Clean {
            command: CleanCommand::Dist { directory },
        } => {
            let directory = directory.unwrap_or_else(|| config.clean.dist_directory.clone());
            match clean::dist(&directory)
                .with_context(|| format!("Failed to clean {}", directory.display()))?
            {
                clean::CleanOutcome::Removed => {
                    ui::display_success(&format!("Deleted {}", directory.display()))
                }
                clean::CleanOutcome::NotFound => ui::display_status(&format!(
                    "{} does not exist, nothing to delete",
                    directory.display()
                )),
            }
            Ok(())
        }
        Command::JsonToXml {
            json_file,
            out_path,
            test_suite_name,
        } => {
            let suite = test_suite_name.unwrap_or_else(|| config.reports.test_suite_name.clone());
            let summary = report::parse_test_output(&json_file, &out_path, &suite)
                .with_context(|| format!("Failed to convert {}", json_file.display()))?;
            ui::display_success(&format!(
                "Wrote {} test(s), {} failed, to {}",
                summary.total,
                summary.failed,
                out_path.display()
            ));
            Ok(())
        }
    }
}

fn run_project_version(command: ProjectVersionCommand, config: &Config) -> Result<()> {
    match command {
        ProjectVersionCommand::Get { ini_path } => {
            let path = ini_path.unwrap_or_else(|| config.project_version.ini_path.clone());
            let version = project_version::get_version(&version_store(&path, config))
                .with_context(|| format!("Failed to read project version from {}", path.display()))?;
            ui::display_version(&version);
        }
        ProjectVersionCommand::Set { version, ini_path } => {
            let path = ini_path.unwrap_or_else(|| config.project_version.ini_path.clone());
            let version = project_version::manually_set_version(&version, &version_store(&path, config))
                .with_context(|| format!("Failed to set project version in {}", path.display()))?;
            ui::display_success(&format!("Project version set to {}", version));
        }
        ProjectVersionCommand::Perforce {
            rel_version,
            dev_version,
            branch,
            ini_path,
        } => {
            let update = project_version::set_version_with_perforce(
                &dev_version,
                &rel_version,
                &branch,
                &version_store(&ini_path, config),
            )
            .with_context(|| format!("Failed to update project version in {}", ini_path.display()))?;

            if update.is_downgrade() {
                ui::display_warning("The new project version is lower than the stored one");
            }
            ui::display_version_change(update.previous.as_ref(), &update.version);
            ui::display_version(&update.version);
        }
    }
    Ok(())
}
