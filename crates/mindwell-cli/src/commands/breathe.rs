use clap::Subcommand;

use mindwell_core::{AppConfig, BreathingTechnique, Clock, Event};

use super::{open_service, print_unlocks, CliResult};

#[derive(Subcommand)]
pub enum BreatheAction {
    /// Run a guided breathing session to completion
    Run {
        /// Technique key (defaults to the configured technique)
        #[arg(long)]
        technique: Option<String>,
        /// Stop after this many completed cycles
        #[arg(long, default_value_t = 3, conflicts_with = "seconds")]
        cycles: u32,
        /// Stop after this many seconds instead of a cycle count
        #[arg(long)]
        seconds: Option<u64>,
        /// Suppress per-phase output
        #[arg(long)]
        quiet: bool,
    },
    /// List available techniques
    Techniques,
}

pub fn run(action: BreatheAction) -> CliResult {
    match action {
        BreatheAction::Run {
            technique,
            cycles,
            seconds,
            quiet,
        } => run_session(technique, cycles, seconds, quiet),
        BreatheAction::Techniques => {
            for key in BreathingTechnique::preset_keys() {
                let technique = BreathingTechnique::preset(key).expect("known preset");
                let phases: Vec<String> = technique
                    .phases()
                    .iter()
                    .map(|p| format!("{} {}s", p.label, p.secs))
                    .collect();
                println!("{key:10} {}  [{}]", technique.name, phases.join(", "));
            }
            Ok(())
        }
    }
}

/// The session loop is the cooperative scheduler: one thread, sleeping
/// between ticks, with the phase deadline checked on each wake-up.
fn run_session(
    technique: Option<String>,
    target_cycles: u32,
    target_seconds: Option<u64>,
    quiet: bool,
) -> CliResult {
    let config = AppConfig::load_or_default();
    let key = technique.unwrap_or(config.breathing.default_technique);
    let technique = BreathingTechnique::preset(&key)
        .ok_or_else(|| format!("unknown technique '{key}' (see `mindwell breathe techniques`)"))?;

    let mut svc = open_service()?;
    let started = svc
        .begin_session(technique)
        .ok_or("a session is already active")?;
    if let Event::SessionStarted {
        technique,
        phase_label,
        phase_secs,
        ..
    } = &started
    {
        println!("{technique}");
        if !quiet {
            println!("  {phase_label} ({phase_secs}s)");
        }
    }

    let tick = std::time::Duration::from_millis(config.breathing.tick_interval_ms);
    loop {
        std::thread::sleep(tick);
        for event in svc.tick_session() {
            match event {
                Event::PhaseAdvanced {
                    phase_label,
                    phase_secs,
                    ..
                } if !quiet => println!("  {phase_label} ({phase_secs}s)"),
                Event::CycleMilestone { cycles, .. } => {
                    println!("Milestone: {cycles} cycles completed!");
                }
                _ => {}
            }
        }

        let now = svc.clock().now();
        let timer = svc.session().expect("session active in loop");
        let done = match target_seconds {
            Some(limit) => timer.elapsed(now).num_seconds() as u64 >= limit,
            None => timer.cycles() >= target_cycles,
        };
        if done {
            break;
        }
    }

    let events = svc.stop_session().expect("session still active");
    if let Some(Event::SessionStopped {
        duration_secs,
        cycles,
        ..
    }) = events.first()
    {
        println!("Session complete: {cycles} cycles in {duration_secs}s.");
    }
    print_unlocks(&events);
    svc.flush()?;
    Ok(())
}
