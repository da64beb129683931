use log::debug;

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::config::*;

/// All the distinct songs of the league, with the members who submitted them.
///
/// Two submissions are the same song when they share the artist, the song name
/// and the album name. Songs come in the order they were first submitted, and
/// the submitters in submission order.
pub fn distinct_songs(league: &League) -> Result<Vec<DistinctSong>, StatsErrors> {
    let mut songs: Vec<DistinctSong> = Vec::new();
    let mut positions: HashMap<(&str, &str, &str), usize> = HashMap::new();
    for round in league.rounds.iter() {
        for (sidx, submission) in round.submissions.iter().enumerate() {
            let submitter =
                submission
                    .submitter
                    .clone()
                    .ok_or_else(|| StatsErrors::MissingSubmitter {
                        round: round.number.clone(),
                        submission: sidx,
                    })?;
            let key = (
                submission.artist.as_str(),
                submission.song_name.as_str(),
                submission.album.name.as_str(),
            );
            if let Some(pos) = positions.get(&key) {
                debug!(
                    "distinct_songs: {:?} submitted again by {}",
                    submission.song_name, submitter
                );
                songs[*pos].submitters.push(submitter);
            } else {
                positions.insert(key, songs.len());
                songs.push(DistinctSong {
                    song_name: submission.song_name.clone(),
                    artist: submission.artist.clone(),
                    album: submission.album.clone(),
                    submitters: vec![submitter],
                });
            }
        }
    }
    Ok(songs)
}

/// Sorts songs for a league-wide listing: by first submitter, then artist, then
/// song name, ignoring case.
pub fn listing_order(songs: &mut [DistinctSong]) {
    songs.sort_by(|s1, s2| {
        let first1 = s1.submitters.first().map(|s| s.as_str()).unwrap_or("");
        let first2 = s2.submitters.first().map(|s| s.as_str()).unwrap_or("");
        compare_case_insensitive(first1, first2)
            .then_with(|| compare_case_insensitive(&s1.artist, &s2.artist))
            .then_with(|| compare_case_insensitive(&s1.song_name, &s2.song_name))
    });
}

fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;

    fn league() -> League {
        let mut b = Builder::new();
        b.round("1", "One");
        b.submit("zoe", "Hey Jude", "The Beatles").unwrap();
        b.submit("Adam", "Yellow", "Coldplay").unwrap();
        b.round("2", "Two");
        b.submit("adam", "Hey Jude", "The Beatles").unwrap();
        b.submit("Zoe", "Clocks", "Coldplay").unwrap();
        b.build()
    }

    #[test]
    fn groups_by_artist_song_and_album() {
        let songs = distinct_songs(&league()).unwrap();
        assert_eq!(songs.len(), 3);
        assert_eq!(songs[0].song_name, "Hey Jude");
        assert_eq!(songs[0].submitters, vec!["zoe", "adam"]);
        assert_eq!(songs[1].submitters, vec!["Adam"]);
        assert_eq!(songs[2].song_name, "Clocks");
    }

    #[test]
    fn other_album_is_another_song() {
        let mut l = league();
        l.rounds[1].submissions[0].album.name = "Past Masters".to_string();
        let songs = distinct_songs(&l).unwrap();
        assert_eq!(songs.len(), 4);
    }

    #[test]
    fn listing_ignores_case() {
        let mut songs = distinct_songs(&league()).unwrap();
        listing_order(&mut songs);
        let names: Vec<&str> = songs.iter().map(|s| s.song_name.as_str()).collect();
        assert_eq!(names, vec!["Yellow", "Clocks", "Hey Jude"]);
    }

    #[test]
    fn missing_submitter() {
        let mut l = league();
        l.rounds[1].submissions[1].submitter = None;
        assert_eq!(
            distinct_songs(&l),
            Err(StatsErrors::MissingSubmitter {
                round: "2".to_string(),
                submission: 1
            })
        );
    }
}
