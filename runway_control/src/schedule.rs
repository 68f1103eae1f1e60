use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    time::Duration,
};

use nom::{
    Finish, IResult, Parser,
    character::complete::{space1, u32, u64},
    combinator::all_consuming,
    sequence::preceded,
};
use rand::Rng;
use tracing::debug;

use crate::{
    aircraft::{AircraftClass, ScheduleEntry},
    error::{ScheduleError, ScheduleResult},
    rules::{FUEL_MAX, FUEL_MIN, MAX_AIRCRAFT},
};

pub fn load_schedule(path: &Path, rng: &mut impl Rng) -> ScheduleResult<Vec<ScheduleEntry>> {
    let file = File::open(path)?;
    parse_schedule(file, rng)
}

/// Reads `aircraft_type arrival_delay runway_time` records, one per line.
///
/// Blank lines and lines starting with `#` are skipped. Each aircraft gets a
/// random fuel reserve in `FUEL_MIN..=FUEL_MAX` seconds.
pub fn parse_schedule<R: Read>(
    reader: R,
    rng: &mut impl Rng,
) -> ScheduleResult<Vec<ScheduleEntry>> {
    let mut schedule = Vec::new();

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let record = line.trim();
        if record.is_empty() || record.starts_with('#') {
            continue;
        }

        let line_number = index + 1;
        let (_, (code, arrival_delay, runway_time)) = nom_schedule_record(record)
            .finish()
            .map_err(|_| ScheduleError::Malformed {
                line: line_number,
                content: line.clone(),
            })?;
        let class = AircraftClass::from_code(code).ok_or(ScheduleError::UnknownAircraftType {
            line: line_number,
            code,
        })?;
        if schedule.len() == MAX_AIRCRAFT {
            return Err(ScheduleError::TooManyAircraft);
        }

        schedule.push(ScheduleEntry {
            class,
            arrival_delay: Duration::from_secs(arrival_delay),
            runway_time: Duration::from_secs(runway_time),
            fuel_reserve: Duration::from_secs(rng.gen_range(FUEL_MIN..=FUEL_MAX)),
        });
    }

    if schedule.is_empty() {
        return Err(ScheduleError::Empty);
    }
    debug!(aircraft = schedule.len(), "schedule loaded");
    Ok(schedule)
}

fn nom_schedule_record(input: &str) -> IResult<&str, (u32, u64, u64)> {
    all_consuming((u32, preceded(space1, u64), preceded(space1, u64))).parse(input)
}
