//! Route selector: the maximum-log-probability path through a DAG (§4.3).

use crate::dag::Dag;
use crate::lexicon::Lexicon;

/// `route[k] = (score, end_inclusive)` for `k` in `0..=run.len()`.
/// `route[run.len()]` is always the terminal sentinel `(0.0, 0)`.
pub type Route = Vec<(f64, usize)>;

/// Compute the best route right-to-left per invariant R1.
///
/// Ties within `dag[k]` are broken by preferring the smallest `end`: the
/// comparison is lexicographic on `(score, end)` and `dag[k]` is built in
/// ascending `end` order, so scanning forward and only replacing the
/// incumbent on a strictly greater score preserves that tie-break.
pub fn compute_route(lexicon: &Lexicon, run: &[char], dag: &Dag) -> Route {
    let n = run.len();
    let mut route: Route = vec![(0.0, 0); n + 1];
    let log_total = (lexicon.total().max(1) as f64).ln();

    for k in (0..n).rev() {
        let ends = &dag[&k];
        let mut best_score = f64::NEG_INFINITY;
        let mut best_end = ends[0];
        for &end in ends {
            let frag: String = run[k..=end].iter().collect();
            let freq = lexicon.freq(&frag);
            let freq_or_one = if freq == 0 { 1 } else { freq };
            let score = (freq_or_one as f64).ln() - log_total + route[end + 1].0;
            if score > best_score {
                best_score = score;
                best_end = end;
            }
        }
        route[k] = (best_score, best_end);
    }

    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::build_dag;

    #[test]
    fn prefers_the_longer_dictionary_word() {
        let mut lex = Lexicon::new();
        lex.insert_raw("清".to_string(), 0);
        lex.insert_raw("清华".to_string(), 10);
        lex.insert_raw("清华大学".to_string(), 60);
        lex.insert_raw("大学".to_string(), 70);
        lex.set_total(140);
        let run: Vec<char> = "清华大学".chars().collect();
        let dag = build_dag(&lex, &run);
        let route = compute_route(&lex, &run, &dag);
        // Walk the route from 0 and confirm it picks a single 4-char word.
        let mut k = 0;
        let mut words = Vec::new();
        while k < run.len() {
            let end = route[k].1;
            words.push(run[k..=end].iter().collect::<String>());
            k = end + 1;
        }
        assert_eq!(words, vec!["清华大学"]);
    }

    #[test]
    fn falls_back_to_single_chars_for_unknown_text() {
        let lex = Lexicon::new();
        let run: Vec<char> = "甲乙".chars().collect();
        let dag = build_dag(&lex, &run);
        let route = compute_route(&lex, &run, &dag);
        assert_eq!(route[0].1, 0);
        assert_eq!(route[1].1, 1);
    }
}
