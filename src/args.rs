use clap::Parser;

/// This is a program to draw the winners of a raffle.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A configuration file in JSON format. The options passed on the
    /// command line take precedence over the content of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (positive integer) The number of winners to draw.
    #[clap(short, long, value_parser)]
    pub winners: Option<String>,

    /// (positive integer, optional) The number of participants. Only used when no list of
    /// participants is provided with --input, or when that list is empty.
    #[clap(short, long, value_parser)]
    pub participants: Option<String>,

    /// (file path, optional) The list of participants, one per line. Fields may be separated
    /// by ',', ';', '|' or tabs.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the outcome of the draw will be written in JSON format
    /// to the given location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
