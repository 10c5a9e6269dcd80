// FILE: src/cli/mod.rs

mod config;
mod handlers;

pub use config::ConfigFile;

use crate::error::{Result, UtilitiesError};
use crate::{Plugin, PluginOptions, Stylesheet, Theme};
use clap::{Arg, ArgAction, Command, ValueEnum};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Css,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GridKindArg {
    Cols,
    Rows,
}

pub struct Cli {
    config: config::ConfigFile,
    start_time: Instant,
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}

impl Cli {
    pub fn new() -> Self {
        Self {
            config: config::ConfigFile::default(),
            start_time: Instant::now(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.start_time = Instant::now();
        let matches = self.build_cli().get_matches();

        self.setup_logging(matches.get_count("verbose"))?;

        if let Some(config_path) = matches.get_one::<String>("config") {
            self.config = config::load(config_path)?;
        }

        match matches.subcommand() {
            Some(("build", sub_matches)) => handlers::handle_build_command(self, sub_matches),
            Some(("list", sub_matches)) => handlers::handle_list_command(self, sub_matches),
            Some(("grid-table", sub_matches)) => handlers::handle_grid_table_command(self, sub_matches),
            Some((name, _)) => Err(UtilitiesError::UnknownCommand {
                name: name.to_string(),
            }),
            None => {
                println!("No subcommand specified. Use --help for usage information.");
                Ok(())
            }
        }
    }

    fn build_cli(&self) -> Command {
        Command::new(crate::NAME)
            .version(crate::VERSION)
            .about(crate::DESCRIPTION)
            .author("Baleada Development Team")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path (.json or .toml)")
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Increase verbosity (can be used multiple times)")
                    .action(ArgAction::Count),
            )
            .subcommand(
                Command::new("build")
                    .about("Generate CSS for class candidates")
                    .arg(Arg::new("classes").help("Class candidates, e.g. center d-64/32").num_args(0..).index(1))
                    .arg(Arg::new("content").long("content").value_name("FILE").help("Scan a file for class candidates").action(ArgAction::Append))
                    .arg(Arg::new("output").short('o').long("output").value_name("FILE").help("Write output to a file instead of stdout"))
                    .arg(Arg::new("format").short('f').long("format").value_parser(clap::value_parser!(OutputFormat)).default_value("css").help("Output format"))
                    .arg(Arg::new("prefix").short('p').long("prefix").value_name("PREFIX").help("Class prefix, overrides the config file"))
                    .arg(Arg::new("namespace").short('n').long("namespace").value_name("NAME").help("Custom property namespace, overrides the config file"))
                    .arg(Arg::new("minify").short('m').long("minify").help("Minify CSS output").action(ArgAction::SetTrue)),
            )
            .subcommand(
                Command::new("list")
                    .about("List the utility classes available with the current configuration")
                    .arg(Arg::new("families").long("families").help("Only list parametric utility names").action(ArgAction::SetTrue)),
            )
            .subcommand(
                Command::new("grid-table")
                    .about("Print a grid template table as JSON")
                    .arg(Arg::new("kind").help("Table kind").value_parser(clap::value_parser!(GridKindArg)).required(true).index(1))
                    .arg(Arg::new("max").long("max").value_name("N").help("Largest track count").value_parser(clap::value_parser!(u32))),
            )
    }

    fn setup_logging(&self, verbose_count: u8) -> Result<()> {
        let log_level = match verbose_count {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        env_logger::Builder::from_default_env()
            .filter_level(log_level)
            .format_timestamp_secs()
            .init();
        Ok(())
    }

    /// Options from the config file, then command-line overrides.
    pub fn build_plugin_options(&self, matches: &clap::ArgMatches) -> Result<PluginOptions> {
        let mut options = self.config.options.clone().unwrap_or_default();

        if let Some(namespace) = matches.try_get_one::<String>("namespace").ok().flatten() {
            options.variable_namespace = namespace.clone();
        }

        options.validate()?;
        Ok(options)
    }

    pub fn prefix(&self, matches: &clap::ArgMatches) -> String {
        matches
            .try_get_one::<String>("prefix")
            .ok()
            .flatten()
            .cloned()
            .or_else(|| self.config.prefix.clone())
            .unwrap_or_default()
    }

    pub fn build_stylesheet(&self, matches: &clap::ArgMatches) -> Result<Stylesheet> {
        let options = self.build_plugin_options(matches)?;
        let theme = match &self.config.theme {
            Some(overrides) => Theme::default().with_overrides(overrides),
            None => Theme::default(),
        };

        // Core plugins have to be known before registration reads them.
        let mut stylesheet = Stylesheet::new(theme)
            .with_prefix(self.prefix(matches))
            .with_disabled_core_plugins(
                self.config.disabled_core_plugins.clone().unwrap_or_default(),
            );
        Plugin::new(options).register(&mut stylesheet);

        log::info!(
            "Registered {} utility families in {}ms",
            stylesheet.family_names().len(),
            self.elapsed_ms()
        );
        Ok(stylesheet)
    }

    pub fn content(&self) -> &[String] {
        self.config.content.as_deref().unwrap_or(&[])
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }
}
