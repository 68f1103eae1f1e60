use std::{io::Write, time::Duration};

use indexmap::IndexMap;
use itertools::{Itertools, MinMaxResult};
use runway_control::{
    aircraft::AircraftClass,
    rules::EMERGENCY_TIMEOUT,
    simulation::{Departure, SimulationReport},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClassSummary {
    pub count: usize,
    pub min_wait: Duration,
    pub mean_wait: Duration,
    pub max_wait: Duration,
}

impl ClassSummary {
    fn from_waits(waits: &[Duration]) -> Option<Self> {
        let (min_wait, max_wait) = match waits.iter().copied().minmax() {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(wait) => (wait, wait),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        let total: Duration = waits.iter().sum();
        Some(Self {
            count: waits.len(),
            min_wait,
            mean_wait: total / waits.len() as u32,
            max_wait,
        })
    }
}

/// Wait statistics per aircraft class, in `AircraftClass::ALL` order.
/// Classes with no departures are left out.
pub(crate) fn summarize(departures: &[Departure]) -> IndexMap<AircraftClass, ClassSummary> {
    let mut waits = departures.iter().into_group_map_by(|departure| departure.class);
    AircraftClass::ALL
        .into_iter()
        .filter_map(|class| {
            let waits = waits
                .remove(&class)?
                .into_iter()
                .map(|departure| departure.waited)
                .collect_vec();
            Some((class, ClassSummary::from_waits(&waits)?))
        })
        .collect()
}

fn seconds(duration: Duration) -> String {
    format!("{:.1}s", duration.as_secs_f64())
}

pub(crate) fn write_summary<W: Write>(
    out: &mut W,
    report: &SimulationReport,
) -> std::io::Result<()> {
    writeln!(out, "Summary:")?;
    for (class, summary) in summarize(&report.departures) {
        writeln!(
            out,
            "  {:<10} {:>4} aircraft, wait min {} / mean {} / max {}",
            class.to_string(),
            summary.count,
            seconds(summary.min_wait),
            seconds(summary.mean_wait),
            seconds(summary.max_wait),
        )?;
    }
    let late_emergencies = report
        .departures
        .iter()
        .filter(|departure| {
            departure.class == AircraftClass::Emergency && departure.waited > EMERGENCY_TIMEOUT
        })
        .count();
    if late_emergencies > 0 {
        writeln!(
            out,
            "  {late_emergencies} emergency aircraft waited longer than {}",
            seconds(EMERGENCY_TIMEOUT)
        )?;
    }
    let out_of_fuel = report
        .departures
        .iter()
        .filter(|departure| departure.waited > departure.fuel_reserve)
        .count();
    if out_of_fuel > 0 {
        writeln!(out, "  {out_of_fuel} aircraft waited past their fuel reserve")?;
    }
    writeln!(
        out,
        "  Direction switches: {}, controller breaks: {}, final direction: {}",
        report.controller.direction_switches,
        report.controller.breaks_taken,
        report.final_state.direction,
    )
}

#[cfg(test)]
mod tests {
    use runway_control::{aircraft::Direction, controller::ShiftSummary, state::RunwayState};

    use super::*;

    fn departure(id: usize, class: AircraftClass, waited_secs: u64) -> Departure {
        Departure {
            id,
            class,
            fuel_reserve: Duration::from_secs(40),
            direction: class.required_direction().unwrap_or(Direction::North),
            waited: Duration::from_secs(waited_secs),
        }
    }

    #[test]
    fn test_summarize_orders_by_class_and_skips_missing() {
        let departures = [
            departure(0, AircraftClass::Cargo, 4),
            departure(1, AircraftClass::Commercial, 0),
            departure(2, AircraftClass::Cargo, 10),
            departure(3, AircraftClass::Commercial, 3),
            departure(4, AircraftClass::Cargo, 1),
        ];
        let summary = summarize(&departures);
        assert_eq!(
            summary.keys().copied().collect_vec(),
            [AircraftClass::Commercial, AircraftClass::Cargo]
        );
        assert_eq!(
            summary[&AircraftClass::Cargo],
            ClassSummary {
                count: 3,
                min_wait: Duration::from_secs(1),
                mean_wait: Duration::from_secs(5),
                max_wait: Duration::from_secs(10),
            }
        );
        assert_eq!(summary[&AircraftClass::Commercial].count, 2);
        assert_eq!(
            summary[&AircraftClass::Commercial].mean_wait,
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize(&[]).is_empty());
    }

    #[test]
    fn test_write_summary() {
        let report = SimulationReport {
            departures: vec![
                departure(0, AircraftClass::Commercial, 2),
                departure(1, AircraftClass::Emergency, 31),
                departure(2, AircraftClass::Cargo, 45),
            ],
            controller: ShiftSummary {
                direction_switches: 2,
                breaks_taken: 1,
                ..Default::default()
            },
            final_state: RunwayState {
                direction: Direction::South,
                ..RunwayState::new()
            },
        };
        let mut out = Vec::new();
        write_summary(&mut out, &report).unwrap();
        let printed = String::from_utf8(out).unwrap();

        let commercial = "  Commercial    1 aircraft, wait min 2.0s / mean 2.0s / max 2.0s\n";
        let controller = "  Direction switches: 2, controller breaks: 1, final direction: SOUTH\n";
        assert!(printed.starts_with("Summary:\n"));
        assert!(printed.contains(commercial));
        assert!(printed.contains("  1 emergency aircraft waited longer than 30.0s\n"));
        assert!(printed.contains("  1 aircraft waited past their fuel reserve\n"));
        assert!(printed.ends_with(controller));
    }
}
