//! Romaji to kana conversion shared by the filter and the transliterators.

/// Romaji syllables and their katakana spelling.
#[rustfmt::skip]
const SYLLABLES: &[(&str, &str)] = &[
	("a", "ア"), ("i", "イ"), ("u", "ウ"), ("e", "エ"), ("o", "オ"),
	("ka", "カ"), ("ki", "キ"), ("ku", "ク"), ("ke", "ケ"), ("ko", "コ"),
	("sa", "サ"), ("si", "シ"), ("shi", "シ"), ("su", "ス"), ("se", "セ"), ("so", "ソ"),
	("ta", "タ"), ("ti", "チ"), ("chi", "チ"), ("tu", "ツ"), ("tsu", "ツ"), ("te", "テ"), ("to", "ト"),
	("na", "ナ"), ("ni", "ニ"), ("nu", "ヌ"), ("ne", "ネ"), ("no", "ノ"), ("nn", "ン"),
	("ha", "ハ"), ("hi", "ヒ"), ("hu", "フ"), ("fu", "フ"), ("he", "ヘ"), ("ho", "ホ"),
	("ma", "マ"), ("mi", "ミ"), ("mu", "ム"), ("me", "メ"), ("mo", "モ"),
	("ya", "ヤ"), ("yu", "ユ"), ("yo", "ヨ"),
	("ra", "ラ"), ("ri", "リ"), ("ru", "ル"), ("re", "レ"), ("ro", "ロ"),
	("wa", "ワ"), ("wo", "ヲ"),
	("ga", "ガ"), ("gi", "ギ"), ("gu", "グ"), ("ge", "ゲ"), ("go", "ゴ"),
	("za", "ザ"), ("zi", "ジ"), ("ji", "ジ"), ("zu", "ズ"), ("ze", "ゼ"), ("zo", "ゾ"),
	("da", "ダ"), ("di", "ヂ"), ("du", "ヅ"), ("de", "デ"), ("do", "ド"),
	("ba", "バ"), ("bi", "ビ"), ("bu", "ブ"), ("be", "ベ"), ("bo", "ボ"),
	("pa", "パ"), ("pi", "ピ"), ("pu", "プ"), ("pe", "ペ"), ("po", "ポ"),
	("kya", "キャ"), ("kyu", "キュ"), ("kyo", "キョ"),
	("sha", "シャ"), ("shu", "シュ"), ("sho", "ショ"),
	("cha", "チャ"), ("chu", "チュ"), ("cho", "チョ"),
	("nya", "ニャ"), ("nyu", "ニュ"), ("nyo", "ニョ"),
	("hya", "ヒャ"), ("hyu", "ヒュ"), ("hyo", "ヒョ"),
	("mya", "ミャ"), ("myu", "ミュ"), ("myo", "ミョ"),
	("rya", "リャ"), ("ryu", "リュ"), ("ryo", "リョ"),
	("gya", "ギャ"), ("gyu", "ギュ"), ("gyo", "ギョ"),
	("ja", "ジャ"), ("ju", "ジュ"), ("jo", "ジョ"),
	("bya", "ビャ"), ("byu", "ビュ"), ("byo", "ビョ"),
	("pya", "ピャ"), ("pyu", "ピュ"), ("pyo", "ピョ"),
	("-", "ー"),
];

/// Longest romaji spelling in [`SYLLABLES`].
const MAX_SYLLABLE: usize = 3;

const SOKUON: &str = "ッ";
const MORAIC_N: &str = "ン";

/// Kana script the output is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
	Katakana,
	Hiragana,
}

impl Script {
	/// Spells `katakana` in this script. Characters outside the katakana
	/// syllable block (the long vowel mark, punctuation) are kept.
	pub fn render(self, katakana: &str) -> String {
		match self {
			Self::Katakana => katakana.to_string(),
			Self::Hiragana => katakana
				.chars()
				.map(|c| match c {
					'\u{30A1}'..='\u{30F6}' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
					_ => c,
				})
				.collect(),
		}
	}
}

/// Outcome of converting the head of a romaji sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	/// `consumed` input characters spell `kana`.
	Kana { kana: &'static str, consumed: usize },
	/// The first character has no kana reading and passes through.
	Literal(char),
	/// The whole input may still grow into a longer syllable.
	Incomplete,
}

fn lookup(romaji: &str) -> Option<&'static str> {
	SYLLABLES
		.iter()
		.find(|(spelling, _)| *spelling == romaji)
		.map(|(_, kana)| *kana)
}

fn is_strict_prefix(romaji: &str) -> bool {
	SYLLABLES
		.iter()
		.any(|(spelling, _)| spelling.len() > romaji.len() && spelling.starts_with(romaji))
}

fn is_vowel(c: char) -> bool {
	matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

fn is_consonant(c: char) -> bool {
	c.is_ascii_lowercase() && !is_vowel(c)
}

/// Converts the head of `input` (lowercase romaji).
///
/// Unless `at_end` is set, a sequence that could still become a longer
/// syllable is reported as [`Step::Incomplete`]. At the end of input a lone
/// consonant reads with an implicit `u`, so `k` becomes `ク`.
pub fn step(input: &[char], at_end: bool) -> Step {
	let Some(&first) = input.first() else {
		return Step::Incomplete;
	};

	if let Some(&next) = input.get(1) {
		if first == 'n' && is_consonant(next) && !matches!(next, 'n' | 'y') {
			return Step::Kana { kana: MORAIC_N, consumed: 1 };
		}
		if is_consonant(first) && first != 'n' && (next == first || (first, next) == ('t', 'c')) {
			return Step::Kana { kana: SOKUON, consumed: 1 };
		}
	}

	if !at_end && input.len() < MAX_SYLLABLE {
		let whole: String = input.iter().collect();
		if is_strict_prefix(&whole) {
			return Step::Incomplete;
		}
	}

	for len in (1..=input.len().min(MAX_SYLLABLE)).rev() {
		let head: String = input[..len].iter().collect();
		if let Some(kana) = lookup(&head) {
			return Step::Kana { kana, consumed: len };
		}
	}

	if first == 'n' {
		return Step::Kana { kana: MORAIC_N, consumed: 1 };
	}
	if is_consonant(first)
		&& let Some(kana) = lookup(&format!("{first}u"))
	{
		return Step::Kana { kana, consumed: 1 };
	}
	Step::Literal(first)
}

/// Converts as much of `pending` as possible into `out`, removing the
/// consumed characters. With `at_end` the whole buffer is converted.
pub fn compose(pending: &mut Vec<char>, at_end: bool, script: Script, out: &mut String) {
	while !pending.is_empty() {
		let consumed = match step(pending, at_end) {
			Step::Kana { kana, consumed } => {
				out.push_str(&script.render(kana));
				consumed
			}
			Step::Literal(c) => {
				out.push(c);
				1
			}
			Step::Incomplete => break,
		};
		pending.drain(..consumed);
	}
}
