use clap::Parser;

/// Season statistics for a music-sharing league.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file with the options below.
    /// Relative paths inside it are resolved against its own directory.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The league document saved by the extraction script. Setting this option overrides
    /// the input that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the statistics in JSON format. Setting this
    /// option overrides the output that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing previously computed statistics in JSON format. If
    /// provided, mlwrapped will check that the computed output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (league identifier) When the document holds several leagues, the one to process.
    #[clap(long, value_parser)]
    pub league: Option<String>,

    /// (member name) Only output the statistics of this member.
    #[clap(long, value_parser)]
    pub member: Option<String>,

    /// (number) Only output this many critics, fans, best songs and worst songs per member.
    #[clap(long, value_parser)]
    pub limit: Option<usize>,

    /// If passed as an argument, the output includes all the distinct songs of the league
    /// with their submitters.
    #[clap(long, takes_value = false)]
    pub songs: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
