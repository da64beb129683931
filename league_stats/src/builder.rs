pub use crate::config::*;

/// A builder for assembling a league without going through a document.
///
/// Submissions are added to the last round, and responses to the last submission.
///
/// ```
/// pub use league_stats::builder::Builder;
/// # use league_stats::StatsErrors;
///
/// let mut builder = Builder::new();
/// builder.member("Anna", "https://example.com/anna.png");
/// builder.round("1", "Songs from your childhood");
/// builder.submit("Anna", "Yellow Submarine", "The Beatles")?;
/// builder.album("Revolver", "https://example.com/revolver.jpg")?;
/// builder.respond("Bob", "+3")?;
///
/// let league = builder.build();
/// assert_eq!(league.rounds[0].submissions[0].responses.len(), 1);
///
/// # Ok::<(), StatsErrors>(())
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    pub(crate) _league: League,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _league: League::default(),
        }
    }

    pub fn member(&mut self, name: &str, avatar: &str) {
        self._league.members.push(Member {
            name: name.to_string(),
            avatar: avatar.to_string(),
        });
    }

    /// Starts a new round. The number is also used as the round identifier.
    pub fn round(&mut self, number: &str, name: &str) {
        self._league.rounds.push(Round {
            id: number.to_string(),
            number: number.to_string(),
            name: name.to_string(),
            description: None,
            submissions: Vec::new(),
        });
    }

    /// Adds a song to the current round.
    pub fn submit(&mut self, submitter: &str, song: &str, artist: &str) -> Result<(), StatsErrors> {
        let round = self._league.rounds.last_mut().ok_or(StatsErrors::NoRound)?;
        round.submissions.push(Submission {
            song_name: song.to_string(),
            artist: artist.to_string(),
            album: Album {
                name: String::new(),
                cover: String::new(),
            },
            submitter: Some(submitter.to_string()),
            comments: String::new(),
            responses: Vec::new(),
        });
        Ok(())
    }

    /// Sets the album of the last submission.
    pub fn album(&mut self, name: &str, cover: &str) -> Result<(), StatsErrors> {
        let submission = self.last_submission()?;
        submission.album = Album {
            name: name.to_string(),
            cover: cover.to_string(),
        };
        Ok(())
    }

    /// Adds a vote to the last submission.
    ///
    /// The votes are kept as text, they are only interpreted when computing the statistics.
    pub fn respond(&mut self, name: &str, votes: &str) -> Result<(), StatsErrors> {
        let submission = self.last_submission()?;
        submission.responses.push(Response {
            name: Some(name.to_string()),
            votes: votes.to_string(),
            comment: None,
        });
        Ok(())
    }

    pub fn build(self) -> League {
        self._league
    }

    fn last_submission(&mut self) -> Result<&mut Submission, StatsErrors> {
        let round = self._league.rounds.last_mut().ok_or(StatsErrors::NoRound)?;
        let number = round.number.clone();
        round
            .submissions
            .last_mut()
            .ok_or(StatsErrors::NoSubmission { round: number })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misuse() {
        let mut b = Builder::new();
        assert_eq!(b.submit("A", "s", "x"), Err(StatsErrors::NoRound));
        assert_eq!(b.respond("B", "1"), Err(StatsErrors::NoRound));
        b.round("3", "Empty");
        assert_eq!(
            b.respond("B", "1"),
            Err(StatsErrors::NoSubmission {
                round: "3".to_string()
            })
        );
    }

    #[test]
    fn responses_go_to_the_last_submission() {
        let mut b = Builder::new();
        b.round("1", "One");
        b.submit("A", "s1", "x").unwrap();
        b.submit("B", "s2", "x").unwrap();
        b.respond("A", "2").unwrap();
        b.album("Album", "cover.jpg").unwrap();
        let league = b.build();
        let subs = &league.rounds[0].submissions;
        assert!(subs[0].responses.is_empty());
        assert_eq!(subs[1].responses[0].name.as_deref(), Some("A"));
        assert_eq!(subs[1].album.cover, "cover.jpg");
    }
}
