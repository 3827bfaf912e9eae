use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use munin::dns::enums::{RecordType, ResponseCode};
use munin::dns::name::Name;
use munin::dns::rdata::RData;
use munin::resolver::{DnsResolver, ResolverConfig};

/// Minimal lookup: prints one A/AAAA address per line and exits non-zero
/// when no address records come back.
#[derive(Parser, Debug)]
#[command(name = "munin-tiny", version, about = "Minimal DNS address lookup")]
struct Args {
    /// Domain name to look up
    name: String,
}

fn init_tracing() {
    let default_filter = if std::env::var("DEBUG").as_deref() == Ok("1") {
        "munin=debug"
    } else {
        "munin=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let name: Name = match args.name.parse() {
        Ok(name) => name,
        Err(e) => {
            warn!("{}: {e}", args.name);
            return ExitCode::FAILURE;
        }
    };

    let resolver = DnsResolver::new(ResolverConfig::from_system());
    let mut printed = 0usize;
    for qtype in [RecordType::A, RecordType::AAAA] {
        let mut reply = match resolver.query(&name, qtype).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("{} lookup failed: {e}", qtype);
                continue;
            }
        };
        if reply.packet().header.rcode != ResponseCode::NoError {
            debug!("{} lookup returned {}", qtype, reply.packet().header.rcode);
            continue;
        }
        let answers = reply.packet().answers.clone();
        for answer in &answers {
            match reply.typed_rdata(answer) {
                Ok(RData::A(addr)) => {
                    println!("{addr}");
                    printed += 1;
                }
                Ok(RData::Aaaa(addr)) => {
                    println!("{addr}");
                    printed += 1;
                }
                Ok(_) => {}
                Err(e) => debug!("skipping answer: {e}"),
            }
        }
    }

    if printed == 0 {
        warn!("no address records for {name}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
