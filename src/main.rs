use std::net::SocketAddr;
use std::process::ExitCode;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use munin::dns::enums::{RecordType, ResponseCode};
use munin::dns::name::Name;
use munin::dns::resource::RecordData;
use munin::error::{DnsError, Result};
use munin::resolver::{DnsResolver, ResolverConfig};

/// DNS lookup tool: queries a recursive resolver and prints the answer
/// section in zone-file form.
#[derive(Parser, Debug)]
#[command(name = "munin", version, about = "DNS lookup tool")]
struct Args {
    /// Domain name to look up
    name: String,

    /// Record type to ask for (A, AAAA, MX, SRV, TXT, NS, CNAME, PTR, SOA)
    qtype: String,

    /// Resolver address to query instead of the system ones (repeatable)
    #[arg(short = 's', long = "dns", value_name = "ADDR")]
    dns: Vec<String>,
}

fn init_tracing() {
    let default_filter = if std::env::var("DEBUG").as_deref() == Ok("1") {
        "munin=debug"
    } else {
        "munin=info"
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
    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            warn!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let name: Name = args.name.parse()?;
    let qtype: RecordType = args.qtype.parse()?;
    let config = if args.dns.is_empty() {
        ResolverConfig::from_system()
    } else {
        ResolverConfig::with_servers(parse_server_args(&args.dns)?)
    };

    let resolver = DnsResolver::new(config);
    let mut reply = resolver.query(&name, qtype).await?;

    let header = reply.packet().header.clone();
    if header.rcode != ResponseCode::NoError {
        warn!("server returned {}", header.rcode);
        return Ok(ExitCode::FAILURE);
    }
    if reply.packet().answers.is_empty() {
        warn!("no answers for {} {}", name, qtype);
        return Ok(ExitCode::FAILURE);
    }

    let answers = reply.packet().answers.clone();
    for answer in &answers {
        let line_head = format!(
            "{}\t{}\t{}\t{}",
            answer.name, answer.ttl, answer.rclass, answer.rtype
        );
        match reply.typed_rdata(answer) {
            Ok(rdata) => println!("{line_head}\t{rdata}"),
            // Leave untypeable records visible: generic RDATA form plus the
            // error name for diagnostics.
            Err(
                e @ (DnsError::UnsupportedResourceType(_) | DnsError::UnknownResourceType(_)),
            ) => {
                if let RecordData::Raw { bytes, .. } = &answer.rdata {
                    println!("{line_head}\t{} ; {:?}", render_generic_rdata(bytes), e);
                }
            }
            Err(e) => return Err(e),
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// `--dns` values may omit the port; default to 53.
fn parse_server_args(args: &[String]) -> Result<Vec<SocketAddr>> {
    let mut servers = Vec::with_capacity(args.len());
    for arg in args {
        let addr = if let Ok(sock) = arg.parse::<SocketAddr>() {
            sock
        } else if let Ok(ip) = arg.parse::<std::net::IpAddr>() {
            SocketAddr::new(ip, 53)
        } else {
            return Err(DnsError::InvalidUpstreamServer(arg.clone()));
        };
        servers.push(addr);
    }
    Ok(servers)
}

/// RFC 3597 generic rendering: `\# <length> <hex>`.
fn render_generic_rdata(bytes: &[u8]) -> String {
    let mut out = format!("\\# {}", bytes.len());
    if !bytes.is_empty() {
        out.push(' ');
        for b in bytes {
            out.push_str(&format!("{b:02x}"));
        }
    }
    out
}
