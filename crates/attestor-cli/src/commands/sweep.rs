//! Sweep command implementation.

use super::open;
use crate::cli::SweepArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use attestor_sweep::SweepWorker;

/// Execute the sweep command.
///
/// Without `--watch` this is one bounded maintenance pass; with it, a
/// background worker keeps sweeping at the profile's interval until
/// interrupted.
pub async fn execute_sweep(args: SweepArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let (mut registry, mut store, actor) = open(config)?;

    if args.watch {
        let mut worker = SweepWorker::new(config.sweep.clone(), actor)?;
        worker.run(&mut registry, &mut store).await?;
        println!("{}", worker.metrics().summary());
        return Ok(());
    }

    let max = args.max.unwrap_or(config.sweep.max_claims_per_sweep);
    let outcome = registry.process_expired_claims(&mut store, &actor, max)?;
    println!("{}", formatter.sweep(&outcome));
    Ok(())
}
