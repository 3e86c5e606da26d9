//! Example walking through the version codec and block entities

use std::rc::Rc;

use protochain_core::{Block, TxMessage};
use protochain_version::{CompositeVersion, FullVersion, ShortVersion};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    println!("Protochain Core Demo");
    println!("====================");

    // Packed protocol versions
    println!("\n1. Packing protocol versions...");
    let full = Rc::new(FullVersion::from_fields(1, 2, 3)?);
    let short = Rc::new(ShortVersion::from_fields(0, 0, 1)?);

    println!("   Full version:  {} -> {}", full, full.as_hex());
    println!("   As bit string: {}", full.as_binary_str());
    println!("   Short offset:  {} -> {}", short, short.as_hex());
    println!("   As bit string: {}", short.as_binary_str());

    // Composite version observing both
    println!("\n2. Deriving the effective version...");
    let composite = CompositeVersion::bound(Rc::clone(&full), Rc::clone(&short))?;
    println!("   Effective version: {}", composite);

    full.set_patch(4)?;
    println!("   After patch bump:  {}", composite);

    // Block header carrying the full version
    println!("\n3. Building a genesis block...");
    let version = FullVersion::from_bytes(&full.as_bytes())?;
    let mut block = Block::genesis(version);
    println!("   Header JSON: {}", block.header().as_json()?);
    println!(
        "   Header size: {} bytes, {} fields",
        block.header().size_in_bytes()?,
        block.header().member_count()
    );

    // A message transaction
    println!("\n4. Adding a message transaction...");
    let mut tx = TxMessage::new();
    tx.set_sender("alice");
    tx.set_acceptor("bob");
    tx.set_content("hello, chain");
    println!("   Tx JSON: {}", tx.as_json()?);
    block.add_tx(tx);
    println!("   Block now holds {} transaction(s)", block.content().len());

    // The nonce placeholder is the last unset header field on genesis
    println!("\n5. Finishing header initialization...");
    block.header_mut().set_nonce(0);
    println!(
        "   Fully initialized: {}",
        block.header().fully_initialized()
    );

    println!("\nAll operations completed.");
    Ok(())
}
