use goan::aggregator::{normalize_call_site, CallSiteCount, TraceStats};
use goan::parser::{scan_str, Block, TraceScanner};

fn block(state: &str, name: &str) -> Block {
    Block {
        state: state.to_string(),
        name: name.to_string(),
    }
}

#[test]
fn test_header_counting() {
    let dump = "goroutine 1 [chan receive]:\na()\n\n\
                goroutine 2 [chan receive]:\nb()\n\n\
                goroutine 3 [running]:\nc()\n\n\
                goroutine 4 [chan receive]:\nd()\n";

    let scan = scan_str(dump);

    assert_eq!(scan.state_counts.get("chan receive"), Some(&3));
    assert_eq!(scan.state_counts.get("running"), Some(&1));
    assert_eq!(scan.total_headers(), 4);
}

#[test]
fn test_block_segmentation_single_token_frames() {
    let scan = scan_str("goroutine 1 [running]:\nfoo.Bar(...)\n\ngoroutine 2 [idle]:\nbaz.Qux(...)\n\n");

    assert_eq!(
        scan.blocks,
        vec![block("running", "foo.Bar(...)"), block("idle", "baz.Qux(...)")]
    );
}

#[test]
fn test_block_segmentation_multi_token_frames() {
    let scan = scan_str(
        "goroutine 5 [select]:\nmain.loop(0xc000010000, 0x1)\n\tmain.go:12 +0x1d\n\n\
         goroutine 6 [select]:\nmain.loop(0xc000010000, 0x1)\n",
    );

    assert_eq!(scan.blocks, vec![block("select", ""), block("select", "")]);
}

#[test]
fn test_deeper_frames_ignored() {
    let scan = scan_str(
        "goroutine 1 [running]:\ntop()\nmiddle()\nbottom()\n\ngoroutine 2 [running]:\nother()\n",
    );

    assert_eq!(scan.blocks.len(), 2);
    assert_eq!(scan.blocks[1], block("running", "other()"));
}

#[test]
fn test_address_normalization() {
    assert_eq!(
        normalize_call_site("created by foo.bar 0x4a2f10"),
        "created by foo.bar"
    );
}

#[test]
fn test_sort_order() {
    let mut dump = String::new();
    for (name, n) in [("A()", 5), ("B()", 9), ("C()", 1)] {
        for _ in 0..n {
            dump.push_str(&format!("goroutine 1 [idle]:\n{}\n\n", name));
        }
    }

    let stats = TraceStats::from_scan(&scan_str(&dump));

    assert_eq!(
        stats.call_sites,
        vec![
            CallSiteCount::new("idle", "B()", 9),
            CallSiteCount::new("idle", "A()", 5),
            CallSiteCount::new("idle", "C()", 1),
        ]
    );
}

#[test]
fn test_state_survives_between_inputs() {
    let mut scanner = TraceScanner::new();

    scanner.scan_reader("goroutine 9 [IO wait]:\n".as_bytes()).unwrap();
    scanner.scan_reader("internal/poll.wait()\n".as_bytes()).unwrap();
    let scan = scanner.finish();

    assert_eq!(scan.blocks, vec![block("IO wait", "internal/poll.wait()")]);
}

#[test]
fn test_frame_cut_between_inputs_keeps_first_fragment() {
    let mut scanner = TraceScanner::new();

    scanner
        .scan_reader("goroutine 3 [chan send]:\nmain.prod".as_bytes())
        .unwrap();
    scanner.scan_reader("ucer()\n\n".as_bytes()).unwrap();
    let scan = scanner.finish();

    assert_eq!(scan.blocks, vec![block("chan send", "main.prod")]);
    assert_eq!(scan.lines, 4);
}
