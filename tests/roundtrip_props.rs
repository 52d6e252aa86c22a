// tests/roundtrip_props.rs
//
// Randomized checks over generated mixed-width text (seeded, reproducible):
// 1) alignment never lands inside a multi-byte sequence;
// 2) chaining forward pages reproduces the text;
// 3) a full forward page read back with read_previous_page comes back
//    identical and starts where the forward read started;
// 4) utf16 pages never hold more units than asked and never a lone half;
// 5) is_boundary is set exactly when the offset is at an end of the file.

use anyhow::Result;
use oorandom::Rand64;

use bigtext::source::SliceSource;
use bigtext::utf8::adjust_to_char_boundary;
use bigtext::{read_next_page, read_previous_page, CountUnit, PagerConfig};

const POOL: &[char] = &[
    'a', 'b', 'z', ' ', '\n', 'é', 'ß', 'Ж', '中', '文', '界', '😀', '🎉', '𝄞',
];

fn gen_text(rng: &mut Rand64, chars: usize) -> String {
    (0..chars)
        .map(|_| POOL[rng.rand_range(0..POOL.len() as u64) as usize])
        .collect()
}

/// Emoji-only text: the lookback heuristic undershoots here.
fn gen_emoji(rng: &mut Rand64, chars: usize) -> String {
    (0..chars)
        .map(|_| ['😀', '🎉', '𝄞'][rng.rand_range(0..3) as usize])
        .collect()
}

#[test]
fn alignment_never_inside_a_sequence() -> Result<()> {
    let mut rng = Rand64::new(0xB16_7E87);
    for _ in 0..20 {
        let text = gen_text(&mut rng, 200);
        let mut src = SliceSource::new(text.as_bytes());
        for off in 0..=text.len() as u64 + 3 {
            let a = adjust_to_char_boundary(&mut src, off)?;
            assert!(a >= off);
            if off <= text.len() as u64 {
                assert!(text.is_char_boundary(a as usize), "off={off} a={a}");
            }
        }
    }
    Ok(())
}

#[test]
fn forward_chain_reproduces_text() -> Result<()> {
    let mut rng = Rand64::new(42);
    for unit in [CountUnit::Scalar, CountUnit::Utf16] {
        let cfg = PagerConfig::default().with_count_unit(unit);
        for _ in 0..30 {
            let len = rng.rand_range(0..400) as usize;
            let text = gen_text(&mut rng, len);
            let mut src = SliceSource::new(text.as_bytes());
            // utf16 needs room for a whole pair to make progress
            let n = rng.rand_range(2..40) as u32;

            let mut off = 0u64;
            let mut out = String::new();
            loop {
                let p = read_next_page(&mut src, off, n, &cfg)?;
                assert!(p.offset >= off);
                assert_eq!(p.is_boundary, p.offset == text.len() as u64);
                out.push_str(&p.content);
                if p.is_boundary {
                    break;
                }
                assert!(p.offset > off, "no progress at {off} with n={n}");
                off = p.offset;
            }
            assert_eq!(out, text, "unit={unit} n={n}");
        }
    }
    Ok(())
}

#[test]
fn forward_then_backward_is_identity() -> Result<()> {
    let mut rng = Rand64::new(7);
    let cfg = PagerConfig::default();
    for round in 0..60 {
        let text = if round % 3 == 0 {
            gen_emoji(&mut rng, 300)
        } else {
            gen_text(&mut rng, 300)
        };
        let mut src = SliceSource::new(text.as_bytes());
        let n = rng.rand_range(1..80) as u32;
        let raw = rng.rand_range(0..text.len() as u64);
        let x = adjust_to_char_boundary(&mut src, raw)?;

        let fwd = read_next_page(&mut src, x, n, &cfg)?;
        let y = fwd.offset;
        let back = read_previous_page(&mut src, y, n, &cfg)?;

        // page ends exactly at y
        assert_eq!(back.offset + back.content.len() as u64, y);
        assert_eq!(back.is_boundary, back.offset == 0);

        if fwd.content.chars().count() == n as usize {
            assert_eq!(back.content, fwd.content, "round={round}");
            assert_eq!(back.offset, x);
            assert!(y - back.offset <= y - x);
        } else {
            // forward hit EOF early; backward may reach further back
            assert!(back.content.ends_with(&fwd.content));
        }
    }
    Ok(())
}

#[test]
fn backward_chain_reproduces_text() -> Result<()> {
    let mut rng = Rand64::new(99);
    let cfg = PagerConfig::default();
    for _ in 0..20 {
        let text = gen_text(&mut rng, 500);
        let mut src = SliceSource::new(text.as_bytes());
        let n = rng.rand_range(1..50) as u32;

        let mut off = text.len() as u64;
        let mut pages = Vec::new();
        loop {
            let p = read_previous_page(&mut src, off, n, &cfg)?;
            assert!(p.offset < off || p.is_boundary);
            off = p.offset;
            let done = p.is_boundary;
            pages.push(p.content);
            if done {
                break;
            }
        }
        pages.reverse();
        assert_eq!(pages.concat(), text);
    }
    Ok(())
}

#[test]
fn utf16_pages_respect_unit_limit() -> Result<()> {
    let mut rng = Rand64::new(1234);
    let cfg = PagerConfig::default().with_count_unit(CountUnit::Utf16);
    for _ in 0..40 {
        let text = gen_text(&mut rng, 200);
        let mut src = SliceSource::new(text.as_bytes());
        let n = rng.rand_range(1..20) as u32;
        let x = adjust_to_char_boundary(&mut src, rng.rand_range(0..text.len() as u64 + 1))?;

        let f = read_next_page(&mut src, x, n, &cfg)?;
        assert!(f.content.encode_utf16().count() <= n as usize);
        assert_eq!(
            &text[x as usize..f.offset as usize],
            f.content,
            "forward content must be the bytes it spans"
        );

        let b = read_previous_page(&mut src, x, n, &cfg)?;
        assert!(b.content.encode_utf16().count() <= n as usize);
        assert_eq!(&text[b.offset as usize..x as usize], b.content);
    }
    Ok(())
}

#[test]
fn emoji_heavy_backward_is_full_with_retries() -> Result<()> {
    let mut rng = Rand64::new(5);
    let text = gen_emoji(&mut rng, 5_000);
    let mut src = SliceSource::new(text.as_bytes());
    let end = text.len() as u64;

    let p = read_previous_page(&mut src, end, 1_000, &PagerConfig::default())?;
    assert_eq!(p.content.chars().count(), 1_000);

    let short = read_previous_page(
        &mut src,
        end,
        1_000,
        &PagerConfig::default().with_lookback_retries(0),
    )?;
    assert!(short.content.chars().count() < 1_000);
    assert!(p.content.ends_with(&short.content));
    Ok(())
}
