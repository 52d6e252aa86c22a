use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use bigtext::{BigFileReader, PageCursor, PageWindow, PagerConfig};

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("bttest-cursor-{prefix}-{pid}-{t}"))
}

fn reader_for(prefix: &str, text: &str, page_chars: u32) -> Result<BigFileReader> {
    let root = unique_root(prefix);
    fs::create_dir_all(&root)?;
    let path = root.join("doc.txt");
    fs::write(&path, text)?;
    Ok(BigFileReader::with_config(
        path,
        PagerConfig::default().with_page_chars(page_chars),
    ))
}

#[test]
fn walk_to_end_and_back() -> Result<()> {
    let text = "一二三四五六七八九十abcdefghij";
    let r = reader_for("walk", text, 4)?;
    let mut cur = PageCursor::new(&r);
    assert_eq!(cur.page_chars(), 4);

    let first = cur.first();
    assert_eq!(first.content, "一二三四");
    assert!(cur.at_start());
    assert!(!cur.at_end());

    let mut forward = vec![first.content];
    while let Some(p) = cur.next() {
        forward.push(p.content);
    }
    assert!(cur.at_end());
    assert_eq!(forward.concat(), text);
    assert_eq!(cur.window().end, text.len() as u64);
    assert!(cur.next().is_none());

    let mut backward = Vec::new();
    while let Some(p) = cur.prev() {
        backward.push(p.content);
    }
    assert!(cur.at_start());
    assert_eq!(cur.window().start, 0);
    backward.reverse();
    // prev pages start from the start of the last forward page
    let last = forward.last().cloned().unwrap_or_default();
    assert_eq!(backward.concat() + &last, text);
    Ok(())
}

#[test]
fn seek_aligns_and_sets_window() -> Result<()> {
    let text = "αβγδεζηθ";
    let r = reader_for("seek", text, 3)?;
    let mut cur = PageCursor::new(&r);

    // 5 is inside "γ" (4..6)
    let p = cur.seek(5);
    assert_eq!(p.content, "δεζ");
    assert_eq!(
        cur.window(),
        PageWindow {
            start: 6,
            end: 12,
            at_start: false,
            at_end: false,
        }
    );

    let back = cur.prev().expect("not at start");
    assert_eq!(back.content, "αβγ");
    assert!(cur.at_start());
    assert!(cur.prev().is_none());
    Ok(())
}

#[test]
fn restore_resumes_from_saved_window() -> Result<()> {
    let text = "0123456789";
    let r = reader_for("restore", text, 4)?;

    let saved = {
        let mut cur = PageCursor::new(&r);
        cur.first();
        cur.next();
        cur.window()
    };
    let json = serde_json::to_string(&saved)?;
    let saved: PageWindow = serde_json::from_str(&json)?;
    assert_eq!((saved.start, saved.end), (4, 8));

    let mut cur = PageCursor::restore(&r, saved).with_page_chars(2);
    let p = cur.next().expect("more pages");
    assert_eq!(p.content, "89");
    assert!(cur.at_end());
    Ok(())
}

#[test]
fn missing_file_stops_immediately() -> Result<()> {
    let r = BigFileReader::with_config(unique_root("gone").join("x"), PagerConfig::default());
    let mut cur = PageCursor::new(&r);
    let p = cur.first();
    assert!(p.is_empty());
    assert!(p.is_boundary);
    assert!(cur.next().is_none());
    assert!(cur.prev().is_none());
    Ok(())
}

#[test]
fn prev_stops_when_file_opens_with_stray_bytes() -> Result<()> {
    let root = unique_root("stray");
    fs::create_dir_all(&root)?;
    let path = root.join("doc.txt");
    let mut bytes = vec![0x80, 0x80];
    bytes.extend_from_slice(b"abcdefg");
    fs::write(&path, &bytes)?;
    let r = BigFileReader::with_config(path, PagerConfig::default().with_page_chars(3));

    let mut cur = PageCursor::new(&r);
    let first = cur.first();
    assert_eq!(first.content, "\u{FFFD}\u{FFFD}a");
    while cur.next().is_some() {}
    assert!(cur.at_end());

    let mut steps = 0;
    while cur.prev().is_some() {
        steps += 1;
        assert!(steps < 10, "prev never reached the start");
    }
    assert!(cur.at_start());
    assert_eq!(cur.window().start, 0);
    Ok(())
}
