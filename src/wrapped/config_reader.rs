use crate::args::Args;
use crate::wrapped::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// The content of the configuration file passed with --config.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct WrappedConfig {
    pub input: Option<String>,
    pub output: Option<String>,
    pub reference: Option<String>,
    pub league: Option<String>,
    pub member: Option<String>,
    pub limit: Option<usize>,
    #[serde(rename = "includeSongs")]
    pub include_songs: Option<bool>,
}

/// The settings of one run, after merging the command line and the configuration file.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RunSettings {
    pub input: Option<String>,
    pub output: Option<String>,
    pub reference: Option<String>,
    pub league: Option<String>,
    pub member: Option<String>,
    pub limit: Option<usize>,
    pub include_songs: bool,
}

pub fn read_config(path: &str) -> WrappedResult<WrappedConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: WrappedConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(rebase_paths(config, Path::new(path).parent()))
}

// Relative paths in a configuration file are relative to that file.
fn rebase_paths(config: WrappedConfig, root: Option<&Path>) -> WrappedConfig {
    let rebase = |p: Option<String>| -> Option<String> {
        match (p, root) {
            (Some(p), Some(root)) if p != "stdout" && Path::new(&p).is_relative() => {
                Some(root.join(p).display().to_string())
            }
            (p, _) => p,
        }
    };
    WrappedConfig {
        input: rebase(config.input),
        output: rebase(config.output),
        reference: rebase(config.reference),
        ..config
    }
}

/// Command line options take precedence over the configuration file.
pub fn merge_settings(args: &Args, config: &WrappedConfig) -> RunSettings {
    RunSettings {
        input: args.input.clone().or_else(|| config.input.clone()),
        output: args.out.clone().or_else(|| config.output.clone()),
        reference: args.reference.clone().or_else(|| config.reference.clone()),
        league: args.league.clone().or_else(|| config.league.clone()),
        member: args.member.clone().or_else(|| config.member.clone()),
        limit: args.limit.or(config.limit),
        include_songs: args.songs || config.include_songs.unwrap_or(false),
    }
}

pub fn resolve_settings(args: &Args) -> WrappedResult<RunSettings> {
    let config = match args.config.as_deref() {
        Some(path) => {
            info!("Reading configuration from {:?}", path);
            read_config(path)?
        }
        None => WrappedConfig::default(),
    };
    let settings = merge_settings(args, &config);
    debug!("resolve_settings: {:?}", settings);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn command_line_overrides_config() {
        let args = Args::parse_from(["mlwrapped", "-i", "cli.json", "--limit", "3"]);
        let config = WrappedConfig {
            input: Some("config.json".to_string()),
            output: Some("out.json".to_string()),
            limit: Some(5),
            include_songs: Some(true),
            ..WrappedConfig::default()
        };
        let settings = merge_settings(&args, &config);
        assert_eq!(settings.input.as_deref(), Some("cli.json"));
        assert_eq!(settings.output.as_deref(), Some("out.json"));
        assert_eq!(settings.limit, Some(3));
        assert!(settings.include_songs);
    }

    #[test]
    fn relative_paths_follow_the_config_file() {
        let config = WrappedConfig {
            input: Some("season.json".to_string()),
            output: Some("stdout".to_string()),
            reference: Some("/abs/ref.json".to_string()),
            ..WrappedConfig::default()
        };
        let rebased = rebase_paths(config, Some(Path::new("/leagues/s3")));
        assert_eq!(rebased.input.as_deref(), Some("/leagues/s3/season.json"));
        assert_eq!(rebased.output.as_deref(), Some("stdout"));
        assert_eq!(rebased.reference.as_deref(), Some("/abs/ref.json"));
    }

    #[test]
    fn config_file_is_read() {
        let path = format!("{}/tests/data/config.json", env!("CARGO_MANIFEST_DIR"));
        let args = Args::parse_from(["mlwrapped", "-c", path.as_str()]);
        let settings = resolve_settings(&args).unwrap();
        let expected_input = format!("{}/tests/data/season.json", env!("CARGO_MANIFEST_DIR"));
        assert_eq!(settings.input, Some(expected_input));
        assert_eq!(settings.output.as_deref(), Some("stdout"));
        assert_eq!(settings.limit, Some(2));
        assert!(settings.include_songs);
    }
}
