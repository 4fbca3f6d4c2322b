use crate::season::{Participant, Pick, PickWindow, Race, RatingEntry, RatingTable};

/// Fill in picks for roster members who didn't pick before the cutoff.
///
/// Each missing participant, in roster order, gets the lowest-rated rider no
/// one in the race has picked yet (rating table order breaks ties). Slots stay
/// empty once the rating table runs out. The returned race is `Closed`; a race
/// that is already `Closed` comes back unchanged.
pub fn auto_fill(race: &Race, roster: &[Participant], ratings: &RatingTable) -> Race {
    let mut race = race.clone();
    if race.is_closed() {
        return race;
    }

    let mut pool: Vec<&RatingEntry> = ratings
        .entries()
        .iter()
        .filter(|entry| !race.is_picked(&entry.rider))
        .collect();
    // Stable, so equal ratings keep table order
    pool.sort_by_key(|entry| entry.stars);
    let mut pool = pool.into_iter();

    for participant in roster {
        if race.picks.contains_key(participant) {
            continue;
        }
        let Some(entry) = pool.next() else {
            break;
        };
        race.picks.insert(
            participant.clone(),
            Pick {
                rider: entry.rider.clone(),
                stars_at_pick_time: entry.stars,
                auto: true,
            },
        );
    }

    race.window = PickWindow::Closed;
    race
}

/// Roster members without a pick in `race`.
pub fn missing_pickers<'a>(race: &Race, roster: &'a [Participant]) -> Vec<&'a Participant> {
    roster
        .iter()
        .filter(|p| !race.picks.contains_key(p.as_str()))
        .collect()
}
