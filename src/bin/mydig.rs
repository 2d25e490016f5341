//! Resolves a domain name starting at the root servers.
//!
//! Usage: mydig [OPTIONS] [NAME]
//!
//! If no name is given, it is read from standard input.

use std::{fmt, io};
use std::process::ExitCode;
use std::time::Duration;

use chrono::{DateTime, Local};
use clap::{Parser, ValueEnum};
use domain::base::{Name, Rtype};
use domain_walk::logging::init_logging;
use domain_walk::{
    race_types, Error, RaceOutcome, RecordData, UdpTransport, WalkConf,
    Walker,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

//------------ Args ----------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "mydig", version, about)]
struct Args {
    /// The domain name to resolve.
    name: Option<String>,

    /// Only look up records of this type instead of racing A and AAAA.
    #[arg(long = "type", value_enum)]
    qtype: Option<QueryType>,

    /// Seconds to wait for a reply from each server.
    #[arg(long, default_value_t = 3.0)]
    timeout: f64,

    /// Maximum number of CNAME redirections to follow.
    #[arg(long, default_value_t = 10)]
    max_alias_chain: usize,

    /// Port the servers listen on.
    #[arg(long, default_value_t = 53)]
    port: u16,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum QueryType {
    A,
    Aaaa,
}

impl From<QueryType> for Rtype {
    fn from(qtype: QueryType) -> Self {
        match qtype {
            QueryType::A => Rtype::A,
            QueryType::Aaaa => Rtype::AAAA,
        }
    }
}

//------------ main ----------------------------------------------------------

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let input = match args.name {
        Some(ref name) => name.clone(),
        None => match prompt().await {
            Ok(line) => line,
            Err(err) => {
                eprintln!("Cannot read domain name: {err}");
                return ExitCode::from(2);
            }
        },
    };
    let (domain, qname) = match parse_input(&input) {
        Ok(parsed) => parsed,
        Err(InputError::Empty) => {
            println!("No domain entered. Exiting.");
            return ExitCode::from(2);
        }
        Err(InputError::Invalid(err)) => {
            println!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut conf = WalkConf::new();
    match Duration::try_from_secs_f64(args.timeout) {
        Ok(timeout) => conf.set_timeout(timeout),
        Err(_) => {
            eprintln!("Invalid timeout: {}", args.timeout);
            return ExitCode::from(2);
        }
    }
    conf.set_max_alias_chain(args.max_alias_chain);
    conf.set_port(args.port);
    let walker = Walker::new(UdpTransport::new(), conf);

    let qtypes = match args.qtype {
        Some(qtype) => vec![qtype.into()],
        None => vec![Rtype::A, Rtype::AAAA],
    };
    match race_types(&walker, &qname, qtypes).await {
        Ok(outcome) => {
            let report = Report {
                domain: &domain,
                outcome: &outcome,
                when: Local::now(),
            };
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Asks for a domain name on standard input.
async fn prompt() -> io::Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Enter a domain name to resolve: ").await?;
    stdout.flush().await?;
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    Ok(line)
}

//------------ Input ---------------------------------------------------------

/// Why the input can’t be resolved.
#[derive(Debug)]
enum InputError {
    /// Nothing is left after trimming.
    Empty,

    /// The input isn’t a domain name.
    Invalid(Error),
}

/// Turns the input into the domain to show and the name to resolve.
///
/// Surrounding whitespace and trailing dots are removed first.
fn parse_input(
    input: &str,
) -> Result<(String, Name<Vec<u8>>), InputError> {
    let domain = input.trim().trim_end_matches('.');
    if domain.is_empty() {
        return Err(InputError::Empty);
    }
    let qname = Name::vec_from_str(domain)
        .map_err(|_| InputError::Invalid(Error::InvalidName(domain.into())))?;
    Ok((domain.into(), qname))
}

//------------ Output --------------------------------------------------------

/// The result of a successful lookup as printed.
///
/// Only the first record of the answer is shown.
struct Report<'a> {
    domain: &'a str,
    outcome: &'a RaceOutcome,
    when: DateTime<Local>,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let answer = &self.outcome.answer;
        writeln!(f, "QUESTION SECTION:")?;
        writeln!(f, "{}.", self.domain)?;
        writeln!(f)?;
        writeln!(f, "ANSWER SECTION:")?;
        match answer.data().first() {
            Some(data) => {
                writeln!(f, "{}", absolute(answer.owner()))?;
                writeln!(
                    f,
                    "{} IN {} {}",
                    answer.ttl().as_secs(),
                    answer.rtype(),
                    rdata(data)
                )?;
            }
            None => writeln!(f, "(no answer)")?,
        }
        writeln!(f)?;
        writeln!(f, "Query time: {} msec", self.outcome.elapsed.as_millis())?;
        writeln!(f, "WHEN: {}", self.when.format("%a %b %d %H:%M:%S %Y"))?;
        writeln!(f)
    }
}

/// Formats a name with its trailing dot.
fn absolute(name: &Name<Vec<u8>>) -> String {
    let mut name = name.to_string();
    if !name.ends_with('.') {
        name.push('.');
    }
    name
}

/// Formats record data.
fn rdata(data: &RecordData) -> String {
    match data {
        RecordData::A(addr) => addr.to_string(),
        RecordData::Aaaa(addr) => addr.to_string(),
        RecordData::Ns(name) | RecordData::Cname(name) => absolute(name),
        RecordData::Other => String::from("\\# 0"),
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use domain::base::Ttl;
    use domain_walk::RecordSet;
    use std::net::Ipv6Addr;

    #[test]
    fn render_answer() {
        let answer = RecordSet::from_parts(
            Name::vec_from_str("example.com").unwrap(),
            Rtype::AAAA,
            Ttl::from_secs(3600),
            vec![RecordData::Aaaa(Ipv6Addr::new(
                0x2001, 0xdb8, 0, 0, 0, 0, 0, 1,
            ))],
        );
        let outcome = RaceOutcome {
            rtype: Rtype::AAAA,
            answer,
            elapsed: Duration::from_micros(42_700),
        };
        let when = Local.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        assert_eq!(
            Report {
                domain: "example.com",
                outcome: &outcome,
                when,
            }
            .to_string(),
            "QUESTION SECTION:\n\
             example.com.\n\
             \n\
             ANSWER SECTION:\n\
             example.com.\n\
             3600 IN AAAA 2001:db8::1\n\
             \n\
             Query time: 42 msec\n\
             WHEN: Mon Oct 19 12:00:00 2026\n\
             \n"
        );
    }

    #[test]
    fn input_is_trimmed() {
        let (domain, qname) = parse_input("example.com.\n").unwrap();
        assert_eq!(domain, "example.com");
        assert_eq!(qname, Name::vec_from_str("example.com.").unwrap());

        let (domain, _) = parse_input("  www.example.com..  ").unwrap();
        assert_eq!(domain, "www.example.com");
    }

    #[test]
    fn empty_input() {
        assert!(matches!(parse_input(""), Err(InputError::Empty)));
        assert!(matches!(parse_input("  ...  "), Err(InputError::Empty)));
        assert!(matches!(parse_input("\n"), Err(InputError::Empty)));
    }

    #[test]
    fn invalid_input() {
        match parse_input("a..b") {
            Err(InputError::Invalid(err)) => {
                assert!(
                    matches!(err, Error::InvalidName(ref name) if name == "a..b")
                );
                assert_eq!(err.to_string(), "Not a domain name: a..b");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn absolute_names() {
        let name = Name::vec_from_str("ns1.example.net.").unwrap();
        assert_eq!(absolute(&name), "ns1.example.net.");
    }

    #[test]
    fn args() {
        let args =
            Args::try_parse_from(["mydig", "--type", "aaaa", "example.com"])
                .unwrap();
        assert_eq!(args.name.as_deref(), Some("example.com"));
        assert!(matches!(args.qtype, Some(QueryType::Aaaa)));
        assert_eq!(args.port, 53);
    }
}
