use anyhow::anyhow;
use log::{debug, info};
use rat_mask::{LocaleSymbols, MaskedProvider};
use std::env;

fn main() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut args = env::args().skip(1);
    let mask = args.next().unwrap_or("(999) 000-0000".to_string());
    let input = args.next().unwrap_or("4255550123x".to_string());

    let mut m = MaskedProvider::builder(&mask)
        .locale(LocaleSymbols::system())
        .build()
        .map_err(|e| anyhow!("{}: {}", mask, e))?;

    info!("mask {:?} with {} positions", m.mask(), m.len());
    for c in input.chars() {
        let r = m.add_char(c);
        info!(
            "{:?} -> {:?} at {} | {}",
            c,
            r.hint,
            r.position,
            m.to_display_string()
        );
    }

    while m.last_assigned_position().is_some() {
        let r = m.remove();
        debug!("remove {:?} | {}", r, m.to_display_string());
    }

    info!(
        "completed={} full={} '{}'",
        m.mask_completed(),
        m.mask_full(),
        m
    );

    Ok(())
}

fn setup_logging() -> Result<(), anyhow::Error> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}
