// Placeholder recommendation engine: catalog order + jittered score.
// There is no model behind it; the remote backend owns real ranking.

pub mod synthesizer;
