//! Command-line interface for triespell
//!
//! Usage:
//!   triespell -d words.txt [WORD...]
//!   echo "recieve" | triespell -d words.txt
//!
//! Options:
//!   -d, --dict <FILE>       Path to a line-format dictionary file
//!   -x, --xpath <EXPR>      Treat the dictionary as XML; select words with EXPR
//!   -c, --settings <FILE>   Open the dictionary described by a settings file
//!   -k, --tolerance <N>     Edit-distance tolerance for suggestions
//!   -b, --best-tolerance <N> Ceiling for the best-match fallback
//!   -j, --json              Output as JSON
//!   -h, --help              Show help

use std::env;
use std::io::{self, BufRead};
use std::process;

use triespell::{LineFile, SpellDictionary, XmlFile};

fn print_help() {
    eprintln!(
        r#"triespell - a trie-based spell checker

USAGE:
    triespell [OPTIONS] [WORD...]
    echo "recieve" | triespell -d words.txt

OPTIONS:
    -d, --dict <FILE>        Path to a line-format dictionary file
    -x, --xpath <EXPR>       Treat the dictionary as XML; select words with EXPR
    -c, --settings <FILE>    Open the dictionary described by a settings file
    -k, --tolerance <N>      Edit-distance tolerance for suggestions
    -b, --best-tolerance <N> Ceiling for the best-match fallback
    -j, --json               Output as JSON
    -h, --help               Show this help message

EXAMPLES:
    triespell -d words.txt recieve
    triespell -d lexicon.xml -x "//entry/lexical-unit" tat
    triespell -c en_US.dict -j tat
"#
    );
}

struct CheckResult {
    word: String,
    known: bool,
    suggestions: Vec<String>,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut dict_path: Option<String> = None;
    let mut settings_path: Option<String> = None;
    let mut xpath: Option<String> = None;
    let mut tolerance: Option<u32> = None;
    let mut best_tolerance: Option<u32> = None;
    let mut json_output = false;
    let mut words: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-j" | "--json" => {
                json_output = true;
            }
            "-d" | "--dict" => {
                i += 1;
                dict_path = Some(expect_value(&args, i, "--dict"));
            }
            "-x" | "--xpath" => {
                i += 1;
                xpath = Some(expect_value(&args, i, "--xpath"));
            }
            "-c" | "--settings" => {
                i += 1;
                settings_path = Some(expect_value(&args, i, "--settings"));
            }
            "-k" | "--tolerance" => {
                i += 1;
                tolerance = Some(expect_number(&args, i, "--tolerance"));
            }
            "-b" | "--best-tolerance" => {
                i += 1;
                best_tolerance = Some(expect_number(&args, i, "--best-tolerance"));
            }
            arg if !arg.starts_with('-') => {
                words.push(arg.to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut dictionary = match (settings_path, dict_path) {
        (Some(settings), _) => match triespell::settings::open(&settings) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Error opening settings '{}': {}", settings, e);
                process::exit(1);
            }
        },
        (None, Some(path)) => {
            let opened = match &xpath {
                Some(expr) => XmlFile::new(path.clone(), expr)
                    .map(|f| SpellDictionary::new(Box::new(f))),
                None => Ok(SpellDictionary::new(Box::new(LineFile::new(path.clone())))),
            };
            match opened {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("Error opening dictionary '{}': {}", path, e);
                    process::exit(1);
                }
            }
        }
        (None, None) => {
            eprintln!("Error: no dictionary given (use --dict or --settings)");
            print_help();
            process::exit(1);
        }
    };

    if let Some(k) = tolerance {
        dictionary.set_error_tolerance(k);
    }
    if let Some(k) = best_tolerance {
        dictionary.set_best_error_tolerance(k);
    }

    // Read from stdin if no words were given on the command line
    if words.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => {
                    let l = l.trim();
                    if !l.is_empty() {
                        words.push(l.to_string());
                    }
                }
                Err(e) => {
                    eprintln!("Error reading stdin: {}", e);
                    process::exit(1);
                }
            }
        }
    }

    if words.is_empty() {
        eprintln!("Error: no words to check");
        print_help();
        process::exit(1);
    }

    let mut results: Vec<CheckResult> = Vec::new();
    let mut all_known = true;
    for word in words {
        let known = match dictionary.contains(&word) {
            Ok(known) => known,
            Err(e) => {
                eprintln!("Error checking '{}': {}", word, e);
                process::exit(1);
            }
        };
        let suggestions = if known {
            Vec::new()
        } else {
            all_known = false;
            match dictionary.suggest(&word) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error suggesting for '{}': {}", word, e);
                    process::exit(1);
                }
            }
        };
        results.push(CheckResult {
            word,
            known,
            suggestions,
        });
    }

    if json_output {
        let value: Vec<serde_json::Value> = results
            .iter()
            .map(|r| {
                serde_json::json!({
                    "word": r.word,
                    "known": r.known,
                    "suggestions": r.suggestions,
                })
            })
            .collect();
        match serde_json::to_string_pretty(&value) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing to JSON: {}", e);
                process::exit(1);
            }
        }
    } else {
        for r in &results {
            if r.known {
                println!("{}: ok", r.word);
            } else if r.suggestions.is_empty() {
                println!("{}: no suggestions", r.word);
            } else {
                println!("{}: {}", r.word, r.suggestions.join(", "));
            }
        }
    }

    if !all_known {
        process::exit(2);
    }
}

fn expect_value(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("Error: {} requires a value", flag);
            process::exit(1);
        }
    }
}

fn expect_number(args: &[String], i: usize, flag: &str) -> u32 {
    match expect_value(args, i, flag).parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Error: {} requires a number", flag);
            process::exit(1);
        }
    }
}
