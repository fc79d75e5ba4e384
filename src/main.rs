use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use urlkit::{Pattern, PatternType, Url, UrlError, UrlPart, UrlPattern};

const USAGE: &str = "usage: urlkit <url>... [--match PART TYPE EXPR]";

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (urls, rule) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    let mut failed = false;
    for text in urls {
        println!("{}", text);
        match Url::parse(text) {
            Ok(url) => {
                print_components(&url);
                if let Some(rule) = &rule {
                    print_match(rule, &url);
                }
            }
            Err(e) => {
                println!("  ✗ Error: {}", e);
                failed = true;
            }
        }
        println!();
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn parse_args(args: &[String]) -> Result<(Vec<&str>, Option<UrlPattern>), String> {
    let mut urls = Vec::new();
    let mut rule = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == "--match" {
            let mut next = || iter.next().map(String::as_str).ok_or("--match needs PART TYPE EXPR");
            let part: UrlPart = next()?.parse().map_err(|e: UrlError| e.to_string())?;
            let kind: PatternType = next()?.parse().map_err(|e: UrlError| e.to_string())?;
            let expression = next()?;
            rule = Some(UrlPattern::new(Some(part), Pattern::new(kind, expression)));
        } else {
            urls.push(arg.as_str());
        }
    }

    if urls.is_empty() {
        return Err("no URLs given".to_string());
    }
    Ok((urls, rule))
}

fn print_components(url: &Url) {
    println!("  scheme:    {}", url.scheme());
    if let Some(user_info) = url.user_info() {
        println!("  user info: {}", user_info);
    }
    println!("  host:      {}", url.hostname());
    match url.port_or_default() {
        Some(port) if url.port().is_some() => println!("  port:      {}", port),
        Some(port) => println!("  port:      {} (default)", port),
        None => println!("  port:      unknown"),
    }
    println!("  path:      {}", url.path());
    if let Some(query) = url.query() {
        println!("  query:     {}", query);
        for (name, value) in url.query_params() {
            println!("    {} = {}", name, value.as_deref().unwrap_or("(none)"));
        }
    }
    if let Some(fragment) = url.fragment() {
        println!("  fragment:  {}", fragment);
    }
    println!("  domain:    {}", url.domain());
    match url.domain_suffix() {
        Some(suffix) => println!("  suffix:    {}", suffix),
        None => println!("  suffix:    (not listed)"),
    }
}

fn print_match(rule: &UrlPattern, url: &Url) {
    match rule.matches(url) {
        Ok(true) => println!("  {} ✓ matches", rule),
        Ok(false) => println!("  {} ✗ no match", rule),
        Err(e) => println!("  {} ✗ Error: {}", rule, e),
    }
}
