use log::{debug, info, warn};

use league_stats::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::wrapped::config_reader::*;

pub mod config_reader;
pub mod document;
pub mod summary;

#[derive(Debug, Snafu)]
pub enum WrappedError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid league data: {source}"))]
    Stats { source: StatsErrors },

    #[snafu(display("No input file given (use --input or the configuration file)"))]
    MissingInput {},
    #[snafu(display("No league {league} in the document"))]
    UnknownLeague { league: String },
    #[snafu(display("The document contains several leagues ({leagues}), pick one with --league"))]
    AmbiguousLeague { leagues: String },
    #[snafu(display("No member named {name} submitted a song"))]
    UnknownMember { name: String },
    #[snafu(display("Difference detected between computed statistics and reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type WrappedResult<T> = Result<T, WrappedError>;

/// Reads the league, computes the statistics and writes them out.
///
/// Returns the statistics that were written.
pub fn run_wrapped(settings: &RunSettings) -> WrappedResult<JSValue> {
    let input = settings.input.clone().context(MissingInputSnafu {})?;
    info!("Reading league from {:?}", input);
    let league = document::read_league(&input, settings.league.as_deref())?;

    let stats = run_league_stats(&league).context(StatsSnafu {})?;
    info!(
        "Computed statistics for {} members ({} malformed votes)",
        stats.members.len(),
        stats.malformed_votes.len()
    );

    let songs = if settings.include_songs {
        let mut songs = distinct_songs(&league).context(StatsSnafu {})?;
        listing_order(&mut songs);
        Some(songs)
    } else {
        None
    };

    let result_js = summary::build_summary_js(&league, &stats, songs.as_deref(), settings)?;
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    write_output(settings.output.as_deref(), &pretty_js_stats)?;

    // The reference statistics, if provided for comparison
    if let Some(reference_p) = settings.reference.clone() {
        check_reference(&reference_p, &result_js)?;
    }

    Ok(result_js)
}

fn write_output(output: Option<&str>, contents: &str) -> WrappedResult<()> {
    match output {
        None | Some("") | Some("stdout") => {
            println!("{}", contents);
        }
        Some(path) => {
            info!("Writing statistics to {:?}", path);
            fs::write(path, contents).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(())
}

pub fn read_summary(path: &str) -> WrappedResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

fn check_reference(reference_p: &str, result_js: &JSValue) -> WrappedResult<()> {
    let summary_ref = read_summary(reference_p)?;
    debug!("check_reference: reference: {:?}", summary_ref);
    // Objects compare regardless of key order.
    if summary_ref == *result_js {
        info!("Statistics match the reference {:?}", reference_p);
        return Ok(());
    }
    warn!("Found differences with the reference {:?}", reference_p);
    let pretty_js_ref = serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    let pretty_js_stats = serde_json::to_string_pretty(result_js).context(ParsingJsonSnafu {})?;
    print_diff(pretty_js_ref.as_str(), pretty_js_stats.as_str(), "\n");
    ReferenceMismatchSnafu { path: reference_p }.fail()
}
