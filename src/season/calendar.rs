use chrono::{Duration, NaiveDateTime};
use std::collections::HashSet;

use super::deadline::pick_deadline;
use super::types::Race;

/// The 2025 road season, as (name, start) pairs.
pub const CALENDAR_2025: [(&str, &str); 56] = [
    ("Tour Down Under", "2025-01-21T10:00"),
    ("Etoile de Bessègues", "2025-02-05T10:00"),
    ("UAE Tour", "2025-02-17T10:00"),
    ("Vuelta A Andalucia Ruta Ciclista Del Sol", "2025-02-19T10:00"),
    ("Omloop", "2025-03-01T10:00"),
    ("Kuurne - Brussels - Kuurne", "2025-03-02T10:00"),
    ("Strade Bianche", "2025-03-08T10:00"),
    ("Paris-Nice", "2025-03-09T10:00"),
    ("Tireno-Adriatico", "2025-03-10T10:00"),
    ("Milano Sanremo", "2025-03-22T10:00"),
    ("Katalonien Rundt", "2025-03-24T10:00"),
    ("Classic Brugge-De Panne", "2025-03-26T10:00"),
    ("E3 Lars Seier Classic", "2025-03-28T10:00"),
    ("Gent-Wevelgem", "2025-03-30T10:00"),
    ("Dwars door Vlaanderen", "2025-04-02T10:00"),
    ("Ronde van Vlaanderen", "2025-04-06T10:00"),
    ("Baskerlandet Rundt", "2025-04-07T10:00"),
    ("Scheldeprijs", "2025-04-09T10:00"),
    ("Paris Roubaix", "2025-04-13T10:00"),
    ("Amstel Gold Race", "2025-04-20T10:00"),
    ("Fleche Wallone", "2025-04-23T10:00"),
    ("Liege-Bastogne-Liege", "2025-04-27T10:00"),
    ("Romandiet Rundt", "2025-04-29T10:00"),
    ("Eschborn-Frankfurt", "2025-05-01T10:00"),
    ("Giro d'Italia", "2025-05-09T10:00"),
    ("9. Etape", "2025-05-18T10:00"),
    ("13. Etape", "2025-05-23T10:00"),
    ("20. Etape", "2025-05-31T10:00"),
    ("4 dage ved Dunkerque", "2025-05-14T10:00"),
    ("Tour of Norway", "2025-05-29T10:00"),
    ("Criterium Dauphiné", "2025-06-08T10:00"),
    ("Tour de Suisse", "2025-06-15T10:00"),
    ("Copenhagen Sprint", "2025-06-22T10:00"),
    ("Tour de France", "2025-07-05T10:00"),
    ("5. Etape", "2025-07-09T10:00"),
    ("14. Etape", "2025-07-17T10:00"),
    ("19. etape", "2025-07-25T10:00"),
    ("Donostia San Sebastian Klasikoa", "2025-08-02T10:00"),
    ("Tour de pologne", "2025-08-04T10:00"),
    ("Vuelta a Burgos", "2025-08-05T10:00"),
    ("Post DK", "2025-08-12T10:00"),
    ("Renewi Tour", "2025-08-20T10:00"),
    ("La Vuelta", "2025-08-23T10:00"),
    ("7. Etape", "2025-08-29T10:00"),
    ("14. Etape", "2025-09-05T10:00"),
    ("17. Etape", "2025-09-10T10:00"),
    ("Bretagne Classic", "2025-08-31T10:00"),
    ("Grand Prix Cycliste de Qubec", "2025-09-12T10:00"),
    ("Grand Prix Cycliste de Montreal", "2025-09-14T10:00"),
    ("VM enkeltstart i Kigali", "2025-09-21T10:00"),
    ("VM linjeløb i Kigali", "2025-09-28T10:00"),
    ("Sparkassen Münsterland Giro", "2025-10-03T10:00"),
    ("EM Guilherand-Granges", "2025-10-05T10:00"),
    ("Gran Piemonte", "2025-10-09T10:00"),
    ("Lombardiet Rundt", "2025-10-11T10:00"),
    ("Paris Tours", "2025-10-12T10:00"),
];

fn calendar_races() -> impl Iterator<Item = Race> {
    CALENDAR_2025
        .iter()
        .map(|(name, date)| Race::new(*name, *date))
}

/// Calendar races not yet in `existing` whose pick deadline is still ahead of `now`.
pub fn upcoming_calendar_races(
    existing: &[Race],
    cutoff: Duration,
    now: NaiveDateTime,
) -> Vec<Race> {
    missing_calendar_races(existing)
        .into_iter()
        .filter(|race| pick_deadline(race, cutoff).is_some_and(|deadline| deadline > now))
        .collect()
}

/// Every calendar race not already present in `existing`, matched on name and date.
pub fn missing_calendar_races(existing: &[Race]) -> Vec<Race> {
    let known: HashSet<(&str, &str)> = existing
        .iter()
        .map(|race| (race.name.as_str(), race.date.as_str()))
        .collect();
    calendar_races()
        .filter(|race| !known.contains(&(race.name.as_str(), race.date.as_str())))
        .collect()
}
