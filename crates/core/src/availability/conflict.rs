use crate::time_grid::Interval;

/// A candidate is admissible when it overlaps none of the obstructions.
///
/// Each break and each active reservation is tested independently with the
/// half-open overlap predicate, so obstructions that contain, sit inside, or
/// straddle the probe all reject it.
pub fn is_admissible(probe: Interval, breaks: &[Interval], reservations: &[Interval]) -> bool {
    first_obstruction(probe, breaks, reservations).is_none()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstruction {
    Break(Interval),
    Reservation(Interval),
}

pub fn first_obstruction(
    probe: Interval,
    breaks: &[Interval],
    reservations: &[Interval],
) -> Option<Obstruction> {
    if let Some(brk) = breaks.iter().find(|brk| brk.overlaps(&probe)) {
        return Some(Obstruction::Break(*brk));
    }
    reservations
        .iter()
        .find(|res| res.overlaps(&probe))
        .map(|res| Obstruction::Reservation(*res))
}
