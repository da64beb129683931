// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A participant of the league, with the reference to their avatar.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Member {
    pub name: String,
    pub avatar: String,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Album {
    pub name: String,
    pub cover: String,
}

/// One vote cast on a submission.
///
/// The vote is kept as the raw text found in the source document. It is
/// only interpreted during the aggregation.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Response {
    /// The member who cast the vote. Required, but checked by the aggregation.
    pub name: Option<String>,
    pub votes: String,
    pub comment: Option<String>,
}

/// A song entered by a member in a round.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Submission {
    pub song_name: String,
    pub artist: String,
    pub album: Album,
    /// Required, but checked by the aggregation.
    pub submitter: Option<String>,
    pub comments: String,
    pub responses: Vec<Response>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Round {
    /// The key of this round in the source document.
    pub id: String,
    pub number: String,
    pub name: String,
    pub description: Option<String>,
    pub submissions: Vec<Submission>,
}

/// A complete league. Rounds are processed in the order given here.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct League {
    pub members: Vec<Member>,
    pub rounds: Vec<Round>,
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SongStats {
    pub name: String,
    /// The number of the round in which this song was submitted.
    pub round: String,
    /// The net votes for this song, zero votes included.
    pub votes: i64,
    pub cover_image: String,
}

/// Statistics for one member who submitted at least one song.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MemberStats {
    pub name: String,
    pub avatar: Option<String>,
    pub net_score: i64,
    pub upvotes: i64,
    /// Sum of the negative votes received. Never positive.
    pub downvotes: i64,
    /// Every other submitter with the sum of the negative votes they cast, most negative first.
    pub critics: Vec<(String, i64)>,
    /// Every other submitter with the sum of the positive votes they cast, most positive first.
    pub fans: Vec<(String, i64)>,
    /// The songs in submission order.
    pub songs: Vec<SongStats>,
    pub best_songs: Vec<SongStats>,
    pub worst_songs: Vec<SongStats>,
    /// 1-based competition rank by net score.
    pub rank: u32,
}

impl MemberStats {
    pub fn critic(&self, name: &str) -> Option<i64> {
        self.critics
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, total)| *total)
    }

    pub fn fan(&self, name: &str) -> Option<i64> {
        self.fans
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, total)| *total)
    }
}

/// A vote that could not be read as an integer and was counted as zero.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MalformedVote {
    pub round: String,
    /// Index of the submission in its round.
    pub submission: usize,
    pub respondent: String,
    pub raw: String,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LeagueStats {
    /// In the order in which the members first submitted a song.
    pub members: Vec<MemberStats>,
    pub malformed_votes: Vec<MalformedVote>,
}

impl LeagueStats {
    pub fn member(&self, name: &str) -> Option<&MemberStats> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// A song as it appears across the whole league, with everyone who submitted it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DistinctSong {
    pub song_name: String,
    pub artist: String,
    pub album: Album,
    pub submitters: Vec<String>,
}

/// Errors that prevent the statistics from being computed.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum StatsErrors {
    MissingSubmitter {
        round: String,
        submission: usize,
    },
    MissingRespondent {
        round: String,
        submission: usize,
        response: usize,
    },
    /// A ranking key could not be compared with the others.
    IncomparableKey {
        index: usize,
    },
    /// A vote total went past the range of an i64.
    VoteOverflow {
        round: String,
        submission: usize,
    },
    NoRound,
    NoSubmission {
        round: String,
    },
}

impl Error for StatsErrors {}

impl Display for StatsErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsErrors::MissingSubmitter { round, submission } => write!(
                f,
                "round {}: submission #{} has no submitter",
                round, submission
            ),
            StatsErrors::MissingRespondent {
                round,
                submission,
                response,
            } => write!(
                f,
                "round {}: response #{} of submission #{} has no respondent name",
                round, response, submission
            ),
            StatsErrors::IncomparableKey { index } => {
                write!(f, "ranking key of item {} is not comparable", index)
            }
            StatsErrors::VoteOverflow { round, submission } => write!(
                f,
                "round {}: the votes of submission #{} overflow",
                round, submission
            ),
            StatsErrors::NoRound => write!(f, "a song was submitted before any round"),
            StatsErrors::NoSubmission { round } => {
                write!(f, "round {}: vote cast before any submission", round)
            }
        }
    }
}
