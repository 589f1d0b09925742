use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::domain::models::appointment::{Appointment, STATUS_CANCELLED};
use crate::domain::models::holiday::Holiday;
use crate::domain::models::schedule::{ScheduleBlock, WorkSchedule};
use crate::domain::models::service::Service;
use crate::error::AppError;

/// Displayable calendar grid: 07:00 through 22:00 in 30-minute steps.
pub const GRID_FIRST_MINUTE: u32 = 7 * 60;
pub const GRID_LAST_MINUTE: u32 = 22 * 60;
pub const GRID_STEP_MIN: u32 = 30;

/// Fallback when a service row cannot be resolved. Never zero: a zero-width
/// interval would pass every conflict check.
pub const DEFAULT_DURATION_MIN: i64 = 30;

pub const REASON_NOT_WORKING: &str = "professional not working this day";
pub const REASON_BLOCKED: &str = "professional blocked";
pub const REASON_RESERVED: &str = "slot already reserved";

/// Strict open-interval overlap. Touching endpoints do not conflict, so
/// back-to-back appointments are always legal.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

pub fn effective_duration_min(service: Option<&Service>) -> i64 {
    match service {
        Some(s) if s.duration_minutes > 0 => s.duration_minutes as i64,
        _ => DEFAULT_DURATION_MIN,
    }
}

pub struct BookingCandidate {
    pub professional_id: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub is_fit_in: bool,
}

/// Read snapshot for one professional and one calendar day, supplied by the
/// caller. The resolver never touches the store itself.
pub struct DaySnapshot<'a> {
    pub work_schedule: Option<&'a WorkSchedule>,
    pub holiday: Option<&'a Holiday>,
    pub blocks: &'a [ScheduleBlock],
    pub appointments: &'a [Appointment],
}

/// Decides whether a candidate booking may proceed.
///
/// Fit-in bookings and bookings without an assigned professional bypass every
/// check. Otherwise the gates run in order: working window (weekly schedule
/// plus holiday override), schedule blocks, double-booking. The first failing
/// gate produces the rejection the caller surfaces verbatim.
pub fn resolve(candidate: &BookingCandidate, snapshot: &DaySnapshot, tz: Tz) -> Result<(), AppError> {
    if candidate.is_fit_in || candidate.professional_id.is_none() {
        return Ok(());
    }

    let local_start = candidate.starts_at.with_timezone(&tz);
    let local_end = candidate.ends_at.with_timezone(&tz);

    let Some((open, close)) = working_window(snapshot.work_schedule, snapshot.holiday) else {
        return Err(AppError::NotWorking(REASON_NOT_WORKING.to_string()));
    };

    if local_start.date_naive() != local_end.date_naive()
        || local_start.time() < open
        || local_end.time() > close
    {
        return Err(AppError::NotWorking(REASON_NOT_WORKING.to_string()));
    }

    if let Some(row) = snapshot.work_schedule
        && let (Some(bs), Some(be)) = (
            row.break_start.as_deref().and_then(parse_hhmm),
            row.break_end.as_deref().and_then(parse_hhmm),
        )
        && local_start.time() < be
        && local_end.time() > bs
    {
        return Err(AppError::NotWorking(REASON_NOT_WORKING.to_string()));
    }

    for block in snapshot.blocks {
        if overlaps(candidate.starts_at, candidate.ends_at, block.start_time, block.end_time) {
            let reason = match &block.reason {
                Some(r) => format!("{}: {}", REASON_BLOCKED, r),
                None => REASON_BLOCKED.to_string(),
            };
            return Err(AppError::Blocked(reason));
        }
    }

    for apt in snapshot.appointments {
        if apt.status == STATUS_CANCELLED {
            continue;
        }
        if overlaps(candidate.starts_at, candidate.ends_at, apt.scheduled_at, apt.end_time) {
            return Err(AppError::DoubleBooked(REASON_RESERVED.to_string()));
        }
    }

    Ok(())
}

/// Effective local working window for a date: the weekly row clipped by any
/// reduced-hours holiday. None means not working at all (closed holiday,
/// missing row, inactive day, or a clip that leaves nothing).
pub fn working_window(
    schedule: Option<&WorkSchedule>,
    holiday: Option<&Holiday>,
) -> Option<(NaiveTime, NaiveTime)> {
    if holiday.is_some_and(|h| h.is_closed) {
        return None;
    }

    let row = schedule?;
    if !row.is_active {
        return None;
    }

    let mut open = parse_hhmm(&row.start_time)?;
    let mut close = parse_hhmm(&row.end_time)?;

    if let Some(h) = holiday {
        if let Some(t) = h.open_time.as_deref().and_then(parse_hhmm) {
            open = open.max(t);
        }
        if let Some(t) = h.close_time.as_deref().and_then(parse_hhmm) {
            close = close.min(t);
        }
    }

    (open < close).then_some((open, close))
}

fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Parses an "HH:MM" pair, requiring start before end.
pub fn parse_hhmm_pair(start: &str, end: &str) -> Option<(NaiveTime, NaiveTime)> {
    let start = parse_hhmm(start)?;
    let end = parse_hhmm(end)?;
    (start < end).then_some((start, end))
}

#[derive(Debug, Serialize)]
pub struct SlotStatus {
    pub time: String,
    pub occupied: bool,
}

pub fn slot_grid() -> Vec<NaiveTime> {
    let mut slots = Vec::new();
    let mut minute = GRID_FIRST_MINUTE;
    while minute <= GRID_LAST_MINUTE {
        slots.push(NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap());
        minute += GRID_STEP_MIN;
    }
    slots
}

/// Marks each grid label occupied when its half-open 30-minute window
/// overlaps a non-cancelled appointment, using the same predicate as the
/// double-booking check.
pub fn occupied_slots(date: NaiveDate, tz: Tz, appointments: &[Appointment]) -> Vec<SlotStatus> {
    slot_grid()
        .into_iter()
        .filter_map(|label| {
            let slot_start = tz.from_local_datetime(&date.and_time(label)).single()?;
            let slot_start = slot_start.with_timezone(&Utc);
            let slot_end = slot_start + Duration::minutes(GRID_STEP_MIN as i64);

            let occupied = appointments.iter().any(|a| {
                a.status != STATUS_CANCELLED
                    && overlaps(slot_start, slot_end, a.scheduled_at, a.end_time)
            });

            Some(SlotStatus {
                time: label.format("%H:%M").to_string(),
                occupied,
            })
        })
        .collect()
}
