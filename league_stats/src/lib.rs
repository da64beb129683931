pub mod builder;
mod config;
pub mod manual;
pub mod ranking;
mod songs;

use log::{debug, info, warn};

use std::{
    cmp::{Ordering, Reverse},
    collections::HashMap,
};

pub use crate::config::*;
pub use crate::songs::*;

// **** Private structures ****

// Vote totals per respondent, kept in the order the respondents were first seen.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
struct Tally {
    entries: Vec<(String, i64)>,
    positions: HashMap<String, usize>,
}

impl Tally {
    /// The running total for this respondent, created at zero if missing.
    fn entry(&mut self, name: &str) -> &mut i64 {
        let pos = match self.positions.get(name) {
            Some(pos) => *pos,
            None => {
                let pos = self.entries.len();
                self.entries.push((name.to_string(), 0));
                self.positions.insert(name.to_string(), pos);
                pos
            }
        };
        &mut self.entries[pos].1
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
struct MemberTally {
    name: String,
    net_score: i64,
    upvotes: i64,
    downvotes: i64,
    critics: Tally,
    fans: Tally,
    songs: Vec<SongStats>,
}

impl MemberTally {
    fn new(name: &str) -> MemberTally {
        MemberTally {
            name: name.to_string(),
            net_score: 0,
            upvotes: 0,
            downvotes: 0,
            critics: Tally::default(),
            fans: Tally::default(),
            songs: Vec::new(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
struct CheckedResponse<'a> {
    respondent: &'a str,
    votes: i64,
}

#[derive(Eq, PartialEq, Debug, Clone)]
struct CheckedSubmission<'a> {
    submitter: &'a str,
    submission: &'a Submission,
    responses: Vec<CheckedResponse<'a>>,
}

struct CheckedRound<'a> {
    round: &'a Round,
    submissions: Vec<CheckedSubmission<'a>>,
}

struct CheckResult<'a> {
    rounds: Vec<CheckedRound<'a>>,
    malformed_votes: Vec<MalformedVote>,
}

/// Computes the statistics of every member who submitted a song in the league.
///
/// The whole league is validated first: a submission without a submitter or a
/// response without a name fails the call. Votes that are not integers count as
/// zero and are reported in [LeagueStats::malformed_votes]. A vote total that does
/// not fit in an `i64` fails with [StatsErrors::VoteOverflow].
///
/// ```
/// use league_stats::builder::Builder;
/// use league_stats::run_league_stats;
/// # use league_stats::StatsErrors;
///
/// let mut builder = Builder::new();
/// builder.round("1", "Openers");
/// builder.submit("Anna", "Song A", "Artist A")?;
/// builder.respond("Bob", "+2")?;
/// builder.submit("Bob", "Song B", "Artist B")?;
/// builder.respond("Anna", "-1")?;
///
/// let stats = run_league_stats(&builder.build())?;
/// assert_eq!(stats.member("Anna").map(|m| m.rank), Some(1));
/// assert_eq!(stats.member("Bob").map(|m| m.net_score), Some(-1));
/// # Ok::<(), StatsErrors>(())
/// ```
pub fn run_league_stats(league: &League) -> Result<LeagueStats, StatsErrors> {
    info!(
        "Processing {} rounds, {} registered members",
        league.rounds.len(),
        league.members.len()
    );
    let cr = checks(league)?;
    if !cr.malformed_votes.is_empty() {
        warn!(
            "run_league_stats: {} vote(s) could not be read and were counted as zero",
            cr.malformed_votes.len()
        );
    }

    let mut tallies: Vec<MemberTally> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for cround in cr.rounds.iter() {
        let round = cround.round.number.as_str();
        for (sidx, csub) in cround.submissions.iter().enumerate() {
            let pos = match positions.get(csub.submitter) {
                Some(pos) => *pos,
                None => {
                    tallies.push(MemberTally::new(csub.submitter));
                    positions.insert(csub.submitter, tallies.len() - 1);
                    tallies.len() - 1
                }
            };
            let tally = &mut tallies[pos];

            let mut net_votes: i64 = 0;
            for response in csub.responses.iter() {
                let (respondent, votes) = (response.respondent, response.votes);
                add_votes(&mut net_votes, votes, round, sidx)?;
                match votes.cmp(&0) {
                    Ordering::Greater => {
                        add_votes(tally.fans.entry(respondent), votes, round, sidx)?;
                        add_votes(&mut tally.upvotes, votes, round, sidx)?;
                    }
                    Ordering::Less => {
                        add_votes(tally.critics.entry(respondent), votes, round, sidx)?;
                        add_votes(&mut tally.downvotes, votes, round, sidx)?;
                    }
                    Ordering::Equal => {
                        // A zero vote only counts for the song itself.
                    }
                }
            }
            add_votes(&mut tally.net_score, net_votes, round, sidx)?;
            tally.songs.push(SongStats {
                name: csub.submission.song_name.clone(),
                round: cround.round.number.clone(),
                votes: net_votes,
                cover_image: csub.submission.album.cover.clone(),
            });
            debug!(
                "run_league_stats: round {}: {:?} by {} got {}",
                cround.round.number, csub.submission.song_name, csub.submitter, net_votes
            );
        }
    }

    symmetrize(&mut tallies);

    let ranks = ranking::competition_ranks(&tallies, |t| t.net_score);

    let avatars: HashMap<&str, &str> = league
        .members
        .iter()
        .map(|m| (m.name.as_str(), m.avatar.as_str()))
        .collect();

    let members: Vec<MemberStats> = tallies
        .into_iter()
        .zip(ranks)
        .map(|(tally, rank)| {
            let avatar = avatars.get(tally.name.as_str()).map(|s| s.to_string());
            finish_member(tally, rank, avatar)
        })
        .collect();

    for m in members.iter() {
        info!(
            "Member {}: rank {} net score {} ({}/{})",
            m.name, m.rank, m.net_score, m.upvotes, m.downvotes
        );
    }

    Ok(LeagueStats {
        members,
        malformed_votes: cr.malformed_votes,
    })
}

// Totals that do not fit in an i64 fail the whole computation.
fn add_votes(total: &mut i64, votes: i64, round: &str, submission: usize) -> Result<(), StatsErrors> {
    match total.checked_add(votes) {
        Some(sum) => {
            *total = sum;
            Ok(())
        }
        None => Err(StatsErrors::VoteOverflow {
            round: round.to_string(),
            submission,
        }),
    }
}

/// Every submitter gets a critic and a fan entry for every other submitter.
fn symmetrize(tallies: &mut [MemberTally]) {
    let names: Vec<String> = tallies.iter().map(|t| t.name.clone()).collect();
    for tally in tallies.iter_mut() {
        for name in names.iter() {
            if *name != tally.name {
                tally.critics.entry(name);
                tally.fans.entry(name);
            }
        }
    }
}

fn finish_member(tally: MemberTally, rank: u32, avatar: Option<String>) -> MemberStats {
    // All the sorts are stable: ties keep the submission order.
    let mut best_songs = tally.songs.clone();
    best_songs.sort_by_key(|s| Reverse(s.votes));
    let mut worst_songs = tally.songs.clone();
    worst_songs.sort_by_key(|s| s.votes);

    let mut critics = tally.critics.entries;
    critics.sort_by_key(|(_, total)| *total);
    let mut fans = tally.fans.entries;
    fans.sort_by_key(|(_, total)| Reverse(*total));

    MemberStats {
        name: tally.name,
        avatar,
        net_score: tally.net_score,
        upvotes: tally.upvotes,
        downvotes: tally.downvotes,
        critics,
        fans,
        songs: tally.songs,
        best_songs,
        worst_songs,
        rank,
    }
}

/// Reads a vote.
///
/// An empty vote is a zero. Returns None if the text is not an integer.
fn parse_votes(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0);
    }
    // Accepts an explicit sign, as in "+2".
    s.parse::<i64>().ok()
}

// Validates the whole league before anything gets counted.
fn checks(league: &League) -> Result<CheckResult<'_>, StatsErrors> {
    let mut rounds: Vec<CheckedRound> = Vec::new();
    let mut malformed_votes: Vec<MalformedVote> = Vec::new();

    for round in league.rounds.iter() {
        let mut submissions: Vec<CheckedSubmission> = Vec::new();
        for (sidx, submission) in round.submissions.iter().enumerate() {
            let submitter = submission
                .submitter
                .as_deref()
                .ok_or_else(|| StatsErrors::MissingSubmitter {
                    round: round.number.clone(),
                    submission: sidx,
                })?;

            let mut responses: Vec<CheckedResponse> = Vec::new();
            for (ridx, response) in submission.responses.iter().enumerate() {
                let respondent = response
                    .name
                    .as_deref()
                    .ok_or_else(|| StatsErrors::MissingRespondent {
                        round: round.number.clone(),
                        submission: sidx,
                        response: ridx,
                    })?;
                let votes = match parse_votes(&response.votes) {
                    Some(v) => v,
                    None => {
                        warn!(
                            "checks: round {}: vote {:?} from {} on {:?} is not a number, counting it as zero",
                            round.number, response.votes, respondent, submission.song_name
                        );
                        malformed_votes.push(MalformedVote {
                            round: round.number.clone(),
                            submission: sidx,
                            respondent: respondent.to_string(),
                            raw: response.votes.clone(),
                        });
                        0
                    }
                };
                responses.push(CheckedResponse { respondent, votes });
            }
            submissions.push(CheckedSubmission {
                submitter,
                submission,
                responses,
            });
        }
        debug!(
            "checks: round {} ({}): {} submissions",
            round.number,
            round.id,
            submissions.len()
        );
        rounds.push(CheckedRound { round, submissions });
    }

    Ok(CheckResult {
        rounds,
        malformed_votes,
    })
}
