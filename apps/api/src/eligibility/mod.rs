// Eligibility matching between one grant and one project.
// The scorer is a pure function over two loose mappings, carried in
// AppState behind the MatchScorer trait so a semantic backend can be
// swapped in without touching handlers.

pub mod handlers;
pub mod scorer;
