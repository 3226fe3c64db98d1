//! Built-in quote corpus. Guarantees the game is playable even without an
//! external quote bank.

use crate::domain::Quote;

const MIN_PLAYABLE_WORDS: usize = 3;

/// The default corpus shipped with the backend.
pub fn built_in_quotes() -> Vec<Quote> {
  [
    ("If you choose, you can be joyful every moment of your life. It's time you made your choice.", "Joy & Choice"),
    ("Joy is a natural phenomenon. Misery is your creation.", "Joy & Life"),
    ("Stress is not caused by your work. It is caused by your inability to manage your body, mind, and emotions.", "Stress & Management"),
    ("Your life is what you make it.", "Life & Creation"),
    ("When pain, misery, or anger happens, it is time to look within you, not around you.", "Inner Journey"),
    ("Life is a process, not a problem. Don't take it too seriously; it is a play.", "Life & Process"),
    ("Seeking security is a sure path to disturbance when the change happens.", "Security & Change"),
    ("Reactivity is enslavement. Responsibility is freedom.", "Responsibility & Freedom"),
    ("Fear is simply because you are not living in the moment.", "Fear & Presence"),
    ("Learning to listen is the first step to intelligent living.", "Listening & Intelligence"),
    ("Integrity, insight, and inclusiveness are the three qualities of leadership.", "Leadership & Qualities"),
    ("Leadership should not be an ambition, it should be a consequence of your competence.", "Leadership & Competence"),
    ("Successful people do the right thing, not necessarily just work hard.", "Success & Action"),
    ("If you want to engineer situations to your success, the first thing you need to engineer is yourself.", "Success & Self-Engineering"),
    ("For a committed person, there is no such thing as failure, only lessons.", "Commitment & Learning"),
    ("Spirituality is not about looking for excuses; it is about facing your own shortcomings.", "Spirituality & Self-Awareness"),
    ("Meditation means dissolving the barriers that you have built unconsciously.", "Meditation & Barriers"),
    ("Awareness is life.", "Awareness & Life"),
    ("The moment you admit 'I do not know,' the possibility of knowing begins.", "Knowledge & Humility"),
  ]
  .into_iter()
  .map(|(text, category)| Quote::new(text, category))
  .collect()
}

/// Quotes too short to jumble are dropped before play.
pub fn playable_quotes(quotes: Vec<Quote>) -> Vec<Quote> {
  quotes
    .into_iter()
    .filter(|q| q.text.split_whitespace().count() >= MIN_PLAYABLE_WORDS)
    .collect()
}
