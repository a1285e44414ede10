//! CLI for checking recovered ECDSA private keys

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use keycheck::math::{
    biguint_to_hex_string, parse_biguint_decimal, secp256k1_order, ValueKind,
};
use keycheck::provider::load_signatures;
use keycheck::signature::{Signature, SignatureInput};
use keycheck::verify::{check_signature, SignatureCheck};
use num_bigint::BigUint;
use num_traits::{Num, One};
use serde::Serialize;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "keycheck")]
#[command(about = "Check a recovered ECDSA private key against the signature equation")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Verify a candidate key against signatures from a file or stdin
    Verify {
        #[arg(default_value = "-")]
        input: String,

        #[arg(long, help = "Candidate private key in decimal")]
        key: String,

        #[arg(
            long,
            help = "Group order modulus in hex (defaults to the secp256k1 order)"
        )]
        modulus: Option<String>,
    },
    /// Run the built-in example vectors
    Demo,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Verify {
            input,
            key,
            modulus,
        } => {
            let d = parse_biguint_decimal(&key, ValueKind::Key)?;
            let n = match modulus {
                Some(hex_str) => parse_modulus_hex(&hex_str)?,
                None => secp256k1_order(),
            };
            let signatures = load_signatures(&input)?;
            if signatures.is_empty() {
                bail!("No signatures in input");
            }

            let report = build_report(&signatures, &d, &n)?;
            println!("{}", format_output(&report, cli.json)?);
            Ok(())
        }
        Command::Demo => {
            let (signatures, d, n) = demo_fixture()?;
            let report = build_report(&signatures, &d, &n)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.summary.all_consistent {
                println!(
                    "Recovered key is consistent with both ECDSA signature equations."
                );
            } else {
                println!(
                    "Verification failed: the candidate key does not satisfy the signature equations."
                );
            }
            Ok(())
        }
    }
}

fn parse_modulus_hex(s: &str) -> Result<BigUint> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let n = BigUint::from_str_radix(digits, 16)
        .map_err(|e| anyhow::anyhow!("Invalid modulus hex: {}", e))?;
    if n <= BigUint::one() {
        bail!("Modulus must be greater than 1");
    }
    Ok(n)
}

/// Example vectors: two signatures recovered from the same key, the
/// secp256k1 group order, and the candidate private key.
fn demo_fixture() -> Result<(Vec<Signature>, BigUint, BigUint)> {
    let tuples = [
        (
            "96305888925087028226280700902788330707257073607110099029890896029884121755055",
            "46159134511846639653039227807867168677952429760806101162575716914492122120852",
            "7519772703183545940918986660617875086369147038649256132503899290067419860069",
        ),
        (
            "82526933124808898216141238576469063794369340677613970807733221005881288311205",
            "111616838599096250300489315075857406212435899769031134709979742002100806022869",
            "16473844652988003574805773187527026768208893032028674194682143648834372476120",
        ),
    ];

    let signatures = tuples
        .into_iter()
        .map(|(z, r, s)| {
            Signature::try_from(SignatureInput {
                r: r.to_string(),
                s: s.to_string(),
                z: z.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let d = parse_biguint_decimal(
        "51762293150226378344177631012693936892603461211481966174304368340569388768931",
        ValueKind::Key,
    )?;
    let n = secp256k1_order();

    Ok((signatures, d, n))
}

#[derive(Serialize)]
struct OutputReport {
    checks: Vec<CheckOutput>,
    summary: SummaryOutput,
}

#[derive(Serialize)]
struct CheckOutput {
    index: usize,
    consistent: bool,
    r_value: String,
    ephemeral_decimal: String,
}

#[derive(Serialize)]
struct SummaryOutput {
    total_signatures: usize,
    consistent_signatures: usize,
    all_consistent: bool,
    key_decimal: String,
    key_hex: String,
}

fn build_report(sigs: &[Signature], d: &BigUint, n: &BigUint) -> Result<OutputReport> {
    let mut checks = Vec::new();
    let mut consistent_count = 0;

    for (i, sig) in sigs.iter().enumerate() {
        let SignatureCheck {
            consistent,
            ephemeral,
        } = check_signature(sig, d, n)?;
        if consistent {
            consistent_count += 1;
        }
        checks.push(CheckOutput {
            index: i + 1,
            consistent,
            r_value: sig.r.to_string(),
            ephemeral_decimal: ephemeral.to_string(),
        });
    }

    let summary = SummaryOutput {
        total_signatures: sigs.len(),
        consistent_signatures: consistent_count,
        all_consistent: consistent_count == sigs.len(),
        key_decimal: d.to_string(),
        key_hex: biguint_to_hex_string(d),
    };

    Ok(OutputReport { checks, summary })
}

fn format_output(report: &OutputReport, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let mut output = String::new();
    output.push_str(&format!(
        "Checked {} signatures against candidate key\n\n",
        report.summary.total_signatures
    ));

    for check in &report.checks {
        output.push_str(&format!("Signature #{}\n", check.index));
        output.push_str(&format!("  R Value: {}\n", check.r_value));
        output.push_str(&format!("  Ephemeral: {}\n", check.ephemeral_decimal));
        output.push_str(&format!(
            "  Status: {}\n",
            if check.consistent {
                "consistent"
            } else {
                "inconsistent"
            }
        ));
        output.push('\n');
    }

    output.push_str(&format!(
        "Candidate Key (decimal): {}\n",
        report.summary.key_decimal
    ));
    output.push_str(&format!(
        "Candidate Key (hex): {}\n",
        report.summary.key_hex
    ));
    if report.summary.all_consistent {
        output.push_str("Result: candidate key satisfies all signature equations.\n");
    } else {
        output.push_str(&format!(
            "Result: candidate key fails {} of {} signature equations.\n",
            report.summary.total_signatures - report.summary.consistent_signatures,
            report.summary.total_signatures
        ));
    }

    Ok(output)
}
