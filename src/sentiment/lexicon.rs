// =============================================================================
// Lexicon Sentiment Scorer (AFINN-style)
// =============================================================================
//
// score = sum(valence of each known token) / number of tokens
//
// Valences range from -5 to +5.  Unknown tokens count toward the denominator
// but contribute nothing.  The built-in lexicon carries a small set of
// Portuguese and English market words; callers can extend it.

use std::collections::HashMap;

use crate::sentiment::SentimentScorer;

const BUILTIN_LEXICON: &[(&str, i32)] = &[
    // Portuguese
    ("alta", 2),
    ("sobe", 2),
    ("subir", 2),
    ("valoriza", 2),
    ("valorização", 2),
    ("dispara", 3),
    ("recorde", 2),
    ("crescimento", 2),
    ("ganho", 2),
    ("ganhos", 2),
    ("otimismo", 3),
    ("forte", 2),
    ("melhora", 2),
    ("positivo", 2),
    ("queda", -2),
    ("cai", -2),
    ("cair", -2),
    ("recua", -1),
    ("desvaloriza", -2),
    ("perda", -2),
    ("perdas", -2),
    ("crise", -3),
    ("risco", -2),
    ("incerteza", -2),
    ("pessimismo", -3),
    ("fraco", -2),
    ("piora", -2),
    ("negativo", -2),
    ("inflação", -1),
    ("recessão", -3),
    ("déficit", -2),
    ("baixa", -2),
    ("caiu", -2),
    ("recuou", -1),
    ("subiu", 2),
    ("avança", 2),
    ("avanço", 2),
    ("fortalece", 2),
    ("enfraquece", -2),
    ("enfraquecido", -2),
    ("corte", -1),
    ("cortes", -1),
    // English
    ("rise", 2),
    ("rises", 2),
    ("rally", 3),
    ("gain", 2),
    ("gains", 2),
    ("surge", 3),
    ("strong", 2),
    ("growth", 2),
    ("optimism", 3),
    ("improve", 2),
    ("positive", 2),
    ("fall", -2),
    ("falls", -2),
    ("drop", -2),
    ("drops", -2),
    ("slump", -3),
    ("loss", -2),
    ("losses", -2),
    ("crisis", -3),
    ("risk", -2),
    ("uncertainty", -2),
    ("weak", -2),
    ("negative", -2),
    ("inflation", -1),
    ("recession", -3),
    ("deficit", -2),
    ("rose", 2),
    ("gained", 2),
    ("higher", 2),
    ("edged", 1),
    ("firmer", 2),
    ("climbed", 2),
    ("advanced", 2),
    ("rallied", 3),
    ("strengthened", 2),
    ("fell", -2),
    ("lower", -2),
    ("slipped", -2),
    ("declined", -2),
    ("tumbled", -3),
    ("weakened", -2),
    ("weakens", -2),
    ("eased", -1),
    ("cut", -1),
    ("cuts", -1),
];

pub struct LexiconScorer {
    valences: HashMap<String, i32>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            valences: BUILTIN_LEXICON
                .iter()
                .map(|&(w, v)| (w.to_string(), v))
                .collect(),
        }
    }

    /// Add or replace a word's valence.
    #[cfg(test)]
    pub fn with_word(mut self, word: &str, valence: i32) -> Self {
        self.valences.insert(word.to_lowercase(), valence.clamp(-5, 5));
        self
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let mut tokens = 0usize;
        let mut total = 0i32;
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            tokens += 1;
            total += self.valences.get(&token.to_lowercase()).copied().unwrap_or(0);
        }
        if tokens == 0 {
            return 0.0;
        }
        total as f64 / tokens as f64
    }
}
