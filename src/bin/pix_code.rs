use clap::Parser;
use rust_decimal::Decimal;

use pix_payload::pix::{self, PaymentCodeRequest};

/// Print the Pix "copia e cola" code for a payee and amount
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Pix key: CPF/CNPJ, phone, email or random key
    #[arg(long)]
    key: String,

    #[arg(long)]
    name: String,

    #[arg(long)]
    city: String,

    /// Amount with a decimal point, e.g. 149.90
    #[arg(long)]
    amount: Decimal,

    #[arg(long)]
    txid: Option<String>,

    /// Also print the decoded fields
    #[arg(long)]
    verbose: bool,
}

fn build_request(args: Args) -> Result<PaymentCodeRequest, String> {
    let mut request = PaymentCodeRequest::new(args.key, args.name, args.city, args.amount);
    if let Some(txid) = args.txid {
        request = request.with_transaction_id(txid);
    }
    if !request.has_valid_amount() {
        return Err(format!("Amount must not be negative: {}", request.amount));
    }
    Ok(request)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let verbose = args.verbose;
    let request = build_request(args)?;

    let payload = pix::encode(&request)?;
    println!("{}", payload);

    if verbose {
        let decoded = pix::decode(&payload)?;
        for f in &decoded.fields {
            println!("  {} {:>2} {}", f.tag, f.value.chars().count(), f.value);
        }
        println!("  63  4 {}", decoded.crc);
    }

    Ok(())
}
