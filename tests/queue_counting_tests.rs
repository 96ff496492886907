//! Counting-only queue tests

use jog_pendant::queue::{Counter, CountingQueue, QueueError};

#[test]
fn test_admission_strict_rule() {
    let mut q: CountingQueue<3, 10, 1> = CountingQueue::new();

    assert_eq!(q.push(b"ab"), Ok(2));
    assert_eq!((q.free_lines(), q.free_bytes()), (2, 7));
    assert!(!q.can_push(7));
    assert_eq!(q.push_len(7), Err(QueueError::Full));
    assert_eq!((q.free_lines(), q.free_bytes()), (2, 7));
}

#[test]
fn test_lengths_fifo() {
    let mut q: CountingQueue<4, 64, 1> = CountingQueue::new();
    q.push(b"A").unwrap();
    q.push(b"BB").unwrap();
    q.push(b"CCC").unwrap();

    for expected in 1..=3 {
        assert_eq!(q.peek_len(), Some(expected));
        assert_eq!(q.peek_len(), Some(expected));
        assert!(q.pop());
    }
    assert_eq!(q.peek_len(), None);
    assert_eq!(q.free_bytes(), 64);
}

#[test]
fn test_line_exhaustion_leaves_counters() {
    let mut q: CountingQueue<2, 64, 1> = CountingQueue::new();
    q.push_len(0).unwrap();
    q.push_len(0).unwrap();

    let before = (q.size(), q.bytes());
    assert_eq!(q.push_len(0), Err(QueueError::Full));
    assert_eq!(before, (q.size(), q.bytes()));
    assert_eq!(q.bytes(), 2);
}

#[test]
fn test_clear_restores_budgets() {
    let mut q: CountingQueue<4, 32, 1> = CountingQueue::new();
    q.push(b"G28").unwrap();
    q.push(b"G0 X0").unwrap();

    q.clear();
    assert_eq!((q.size(), q.free_lines(), q.free_bytes()), (0, 4, 32));
    assert!(!q.pop());
}

#[test]
fn test_models_controller_rx_buffer() {
    // 128-byte receive buffer, '\n' after every line
    let mut q: CountingQueue<16, 128, 1> = CountingQueue::new();
    let jog = b"$J=G91 F100 X-0.1";

    let mut accepted = 0;
    while q.push(jog).is_ok() {
        accepted += 1;
    }
    // 18 bytes each; the strict rule keeps one byte spare
    assert_eq!(accepted, 7);
    assert_eq!(q.free_bytes(), 128 - 7 * 18);
}

#[test]
fn test_huge_length_refused() {
    let mut q: CountingQueue<4, 64, 1> = CountingQueue::new();

    assert!(!q.can_push(usize::MAX));
    assert_eq!(q.push_len(usize::MAX), Err(QueueError::Full));
    assert_eq!(q.push_len(usize::MAX - 1), Err(QueueError::Full));
    assert_eq!((q.size(), q.free_bytes()), (0, 64));
}
