use clap::{crate_version, App, AppSettings, Arg, ArgMatches};
use dnscheck::{
    expand, validate_output_path, Category, CheckError, Checker, Input, InputType, Resolver,
    Result,
};
use std::net::IpAddr;
use std::path::Path;
use std::process;

fn create_clap_app(version: &'static str) -> App<'static, 'static> {
    App::new("dnscheck")
        .version(version)
        .about("Bulk DNS Lookup Tool.")
        .usage("dnscheck -i <file>... [--dmarc] [--spf] [--mx] [-a] [-x] -o <xlsx>")
        .setting(AppSettings::ArgRequiredElseHelp)
        .arg(
            Arg::with_name("input")
                .help("CSV or text file(s) containing a list of domains. Glob patterns are expanded.")
                .short("i")
                .long("input")
                .value_name("file")
                .takes_value(true)
                .multiple(true)
                .required(true),
        )
        .arg(
            Arg::with_name("input-type")
                .help("Type of input file to process (txt or csv).")
                .long("input-type")
                .possible_values(&["csv", "txt"])
                .default_value("csv")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("host-ip")
                .help("CSV field of host or IP. (default=Domain)")
                .long("host-ip")
                .value_name("IP/HOST")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("ns")
                .help("List of DNS server addresses. The system resolvers are used by default.")
                .long("ns")
                .value_name("8.8.8.8")
                .takes_value(true)
                .multiple(true)
                .validator(validate_ip),
        )
        .arg(
            Arg::with_name("timeout")
                .help("dnscheck -i hosts.csv --mx -o report.xlsx -t 10")
                .short("t")
                .long("timeout")
                .default_value("5")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("dmarc")
                .help("DMARC record lookup")
                .long("dmarc"),
        )
        .arg(Arg::with_name("spf").help("SPF record lookup").long("spf"))
        .arg(Arg::with_name("mx").help("MX record lookup").long("mx"))
        .arg(
            Arg::with_name("forward")
                .help("A record lookup")
                .short("a")
                .long("forward"),
        )
        .arg(
            Arg::with_name("reverse")
                .help("PTR record lookup, ip to host")
                .short("x")
                .long("reverse")
                .visible_alias("rdns"),
        )
        .arg(
            Arg::with_name("output")
                .help("Output file, must end in .xlsx")
                .short("o")
                .long("output")
                .value_name("xlsx")
                .takes_value(true)
                .required(true)
                .validator(|v| validate_output_path(&v)),
        )
        .arg(
            Arg::with_name("verbosity")
                .help("dnscheck -i hosts.csv --mx -o report.xlsx -v info")
                .short("v")
                .long("verbosity")
                .takes_value(true),
        )
}

fn validate_ip(value: String) -> std::result::Result<(), String> {
    value
        .parse::<IpAddr>()
        .map(|_| ())
        .map_err(|e| format!("Invalid IP address: {}", e))
}

fn enabled_categories(matches: &ArgMatches) -> Vec<Category> {
    let flags = [
        ("dmarc", Category::Dmarc),
        ("spf", Category::Spf),
        ("mx", Category::Mx),
        ("forward", Category::A),
        ("reverse", Category::Ptr),
    ];
    flags
        .iter()
        .filter(|(flag, _)| matches.is_present(flag))
        .map(|(_, category)| *category)
        .collect()
}

async fn run(matches: ArgMatches<'static>) -> Result<()> {
    if let Some(filter) = matches.value_of("verbosity") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| CheckError::Logging(e.to_string()))?;
    }

    // Everything the user gave us is checked before the first query goes out.
    let patterns: Vec<&str> = matches.values_of("input").into_iter().flatten().collect();
    let paths = expand(&patterns)?;
    let input_type: InputType = matches.value_of("input-type").unwrap_or("csv").parse()?;
    let timeout: u64 = matches.value_of("timeout").unwrap_or("5").parse()?;
    let output = matches.value_of("output").unwrap_or_default();
    validate_output_path(output)?;

    for path in &paths {
        println!("Input file: {}", path.display());
    }
    let hosts = Input::read(&paths, input_type, matches.value_of("host-ip"))?.hosts();

    let nameservers = matches
        .values_of("ns")
        .into_iter()
        .flatten()
        .map(|ns| {
            ns.parse::<IpAddr>()
                .map_err(|e| CheckError::Input(format!("Invalid IP address: {}", e)))
        })
        .collect::<Result<Vec<IpAddr>>>()?;

    // if the user specified a list of nameservers, use them.
    let resolver = if nameservers.is_empty() {
        Resolver::system()?
    } else {
        Resolver::with_nameservers(&nameservers)
    }
    .timeout(timeout);
    println!("Nameserver(s): {:?}", resolver.nameservers());

    let checker = enabled_categories(&matches)
        .into_iter()
        .fold(Checker::new(resolver.build()), Checker::enable);
    let report = checker.check(&hosts).await;

    dnscheck::write_workbook(&report, Path::new(output))?;
    println!(
        "Please see report: {} ({} failed lookups)",
        output,
        report.num_failures()
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let matches = create_clap_app(crate_version!()).get_matches();
    if let Err(e) = run(matches).await {
        eprintln!("dnscheck: {}", e);
        process::exit(1);
    }
}
