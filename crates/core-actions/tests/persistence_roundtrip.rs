use core_actions::io_ops::{load_document, write_bytes};
use core_state::{Cursor, TextBuffer};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Edit {
    Insert(u8),
    Delete,
    Split,
    Join,
    Move(usize, usize),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        4 => prop_oneof![Just(b'\t'), Just(b'\n'), 0x20u8..0x7f, 0x80u8..=0xff].prop_map(Edit::Insert),
        2 => Just(Edit::Delete),
        1 => Just(Edit::Split),
        1 => Just(Edit::Join),
        2 => (0usize..12, 0usize..6).prop_map(|(x, y)| Edit::Move(x, y)),
    ]
}

fn apply(buf: &mut TextBuffer, cur: &mut Cursor, e: &Edit) {
    match *e {
        Edit::Insert(b) => buf.insert_char(cur, b),
        Edit::Delete => buf.delete_char(cur),
        Edit::Split => buf.split_line(cur),
        Edit::Join => buf.join_with_previous(cur),
        Edit::Move(x, y) => {
            cur.cy = y.min(buf.len());
            cur.cx = x.min(buf.row_len(cur.cy));
        }
    }
}

proptest! {
    #[test]
    fn saved_document_reloads_identically(edits in prop::collection::vec(edit(), 0..60)) {
        let mut buf = TextBuffer::new();
        let mut cur = Cursor::origin();
        for e in &edits {
            apply(&mut buf, &mut cur, e);
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        write_bytes(&path, &buf.to_bytes()).unwrap();
        let reloaded = load_document(&path).unwrap();

        let before: Vec<&[u8]> = buf.rows().iter().map(|r| r.chars()).collect();
        let after: Vec<&[u8]> = reloaded.rows().iter().map(|r| r.chars()).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(reloaded.dirty(), 0);
    }
}
