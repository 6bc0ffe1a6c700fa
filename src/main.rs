use clap::Parser;
use cnroute::apnic::{Extractor, DEFAULT_ECONOMY};
use cnroute::fetch::DEFAULT_LOCATION;
use env_logger::Env;
use log::error;
use std::io::{self, Write};
use std::process;

/// Print the CIDR blocks outside an economy's APNIC allocations and the
/// reserved IPv4 ranges.
#[derive(Parser)]
#[command(author = "Daniel Yu")]
struct Opts {
    /// APNIC file path or a url
    #[arg(short, long = "file", default_value = DEFAULT_LOCATION)]
    f: String,

    /// Economy code of the allocations to exclude
    #[arg(short, long, default_value = DEFAULT_ECONOMY)]
    country: String,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {}:{} {} {}",
                buf.timestamp(),
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0),
                record.level(),
                record.args()
            )
        })
        .init();

    let option = Opts::parse();
    let stdout = io::stdout();
    process::exit(execute(&option, &mut stdout.lock()));
}

/// Run the pipeline for `option`, writing the blocks to `out`. Returns the
/// process exit code.
fn execute<W: Write>(option: &Opts, out: &mut W) -> i32 {
    let extractor = Extractor::new(&option.country.to_uppercase());
    let list = match cnroute::run(&option.f, &extractor) {
        Ok(list) => list,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };
    if let Err(e) = write!(out, "{}", list).and_then(|_| out.flush()) {
        error!("{}", e);
        return 1;
    }
    0
}
