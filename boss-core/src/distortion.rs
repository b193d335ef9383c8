//! Cosmetic garbling for boss dialogue.
//!
//! Purely visual: nothing here touches game state, and output is only
//! reproducible in distribution.

use rand::seq::SliceRandom;
use rand::Rng;

const GLITCH_GLYPHS: [char; 9] = ['#', '@', '%', '&', '*', '~', '§', '∆', '¤'];

const UPPER_BAND: f64 = 0.20;
const LOWER_BAND: f64 = 0.40;
const GLITCH_BAND: f64 = 0.45;
const SPACE_EXPAND_CHANCE: f64 = 0.10;
const EXPANDED_SPACE: &str = "   ";
const STUTTER_CHANCE: f64 = 0.30;
const STUTTER_MIN_WORDS: usize = 5;

/// Garble `message` using the thread RNG.
pub fn distort(message: &str) -> String {
    distort_with_rng(message, &mut rand::thread_rng())
}

/// Garble `message` with a specific RNG (useful for testing).
///
/// Letters are independently upper-cased, lower-cased, swapped for a glitch
/// glyph, or left alone. Spaces occasionally widen. With enough words, one of
/// them may stutter (appear twice in a row).
pub fn distort_with_rng<R: Rng + ?Sized>(message: &str, rng: &mut R) -> String {
    let mut words: Vec<String> = message.split(' ').map(|w| garble_word(w, rng)).collect();

    let word_count = words.iter().filter(|w| !w.is_empty()).count();
    if rng.gen_bool(STUTTER_CHANCE) && word_count >= STUTTER_MIN_WORDS {
        let i = rng.gen_range(0..words.len() - 1);
        let repeated = words[i].clone();
        words.insert(i, repeated);
    }

    let mut out = String::with_capacity(message.len() + 8);
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            if rng.gen_bool(SPACE_EXPAND_CHANCE) {
                out.push_str(EXPANDED_SPACE);
            } else {
                out.push(' ');
            }
        }
        out.push_str(word);
    }
    out
}

fn garble_word<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut out = String::with_capacity(word.len());
    for ch in word.chars() {
        if !ch.is_alphabetic() {
            out.push(ch);
            continue;
        }
        let r: f64 = rng.gen();
        if r < UPPER_BAND {
            out.extend(ch.to_uppercase());
        } else if r < LOWER_BAND {
            out.extend(ch.to_lowercase());
        } else if r < GLITCH_BAND {
            out.push(*GLITCH_GLYPHS.choose(rng).unwrap_or(&'#'));
        } else {
            out.push(ch);
        }
    }
    out
}
