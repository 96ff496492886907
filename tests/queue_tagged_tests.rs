//! Tagged queue tests

use jog_pendant::queue::{Message, QueueError, TaggedQueue};

#[derive(Debug, PartialEq)]
struct Sender(&'static str);

#[test]
fn test_tags_in_order_with_repeated_peeks() {
    let (t1, t2, t3) = (Sender("t1"), Sender("t2"), Sender("t3"));
    let mut q: TaggedQueue<'_, Sender, 64> = TaggedQueue::new();

    q.push(Message::new(b"one", &t1)).unwrap();
    q.push(Message::new(b"two", &t2)).unwrap();
    q.push(Message::new(b"three", &t3)).unwrap();
    assert_eq!(q.count(), 3);

    let mut popped = Vec::new();
    let records: [&[u8]; 3] = [b"one", b"two", b"three"];
    for expected in records {
        for _ in 0..3 {
            let msg = q.peek().unwrap();
            assert_eq!(msg.data, expected);
        }
        popped.push(q.pop().unwrap());
    }

    assert_eq!(popped, [&t1, &t2, &t3]);
    assert!(q.is_empty());
    assert_eq!(q.pop(), None);
}

#[test]
fn test_peek_pairs_record_and_tag() {
    let (a, b) = (Sender("a"), Sender("b"));
    let mut q: TaggedQueue<'_, Sender, 64> = TaggedQueue::new();

    q.push(Message::new(b"G0 X1", &a)).unwrap();
    q.push(Message::new(b"G0 X2", &b)).unwrap();

    let msg = q.peek().unwrap();
    assert_eq!((msg.data, msg.tag), (&b"G0 X1"[..], &a));
    assert_eq!(q.pop(), Some(&a));

    let msg = q.peek().unwrap();
    assert_eq!((msg.data, msg.tag), (&b"G0 X2"[..], &b));
}

#[test]
fn test_admission_and_accounting() {
    let tag = Sender("host");
    let mut q: TaggedQueue<'_, Sender, 16> = TaggedQueue::new();

    assert!(q.can_push(10));
    q.push(Message::new(b"0123456789", &tag)).unwrap();
    assert_eq!((q.size(), q.available()), (11, 5));

    // 3 + 1 < 5
    assert!(q.can_push(3));
    assert!(!q.can_push(4));

    // push only needs the store to take the frame
    assert_eq!(q.push(Message::new(b"1234", &tag)), Ok(4));
    assert_eq!(q.available(), 0);
    assert_eq!(q.push(Message::new(b"", &tag)), Err(QueueError::Full));
    assert_eq!((q.count(), q.size()), (2, 16));
}

#[test]
fn test_truncates_to_line_bound() {
    let tag = Sender("jog");
    let mut q: TaggedQueue<'_, Sender, 64, 4> = TaggedQueue::new();

    assert_eq!(q.push(Message::new(b"G1 X100", &tag)), Ok(4));
    assert_eq!(q.size(), 5);
    assert_eq!(q.peek().map(|m| m.data), Some(&b"G1 X"[..]));
}

#[test]
fn test_tag_capacity_exhaustion() {
    let tag = Sender("jog");
    let mut q: TaggedQueue<'_, Sender, 64, 100, 3> = TaggedQueue::new();

    for _ in 0..3 {
        q.push(Message::new(b"", &tag)).unwrap();
    }
    let before = (q.count(), q.size(), q.available());
    assert!(!q.can_push(0));
    assert_eq!(q.push(Message::new(b"", &tag)), Err(QueueError::Full));
    assert_eq!(before, (q.count(), q.size(), q.available()));
}

#[test]
fn test_clear_drops_records_and_tags() {
    let tag = Sender("jog");
    let mut q: TaggedQueue<'_, Sender, 32> = TaggedQueue::new();

    q.push(Message::new(b"abc", &tag)).unwrap();
    q.push(Message::new(b"def", &tag)).unwrap();
    q.peek();

    q.clear();
    assert_eq!((q.count(), q.size(), q.available()), (0, 0, 32));
    assert!(q.peek().is_none());
    assert_eq!(q.pop(), None);
}

#[test]
fn test_push_respects_cached_record() {
    let (a, b) = (Sender("a"), Sender("b"));
    let mut q: TaggedQueue<'_, Sender, 8> = TaggedQueue::new();

    q.push(Message::new(b"12345", &a)).unwrap();
    assert!(q.peek().is_some());

    // the store has room again, the byte bound does not
    assert_eq!(q.available(), 2);
    assert!(!q.can_push(5));
    assert_eq!(q.push(Message::new(b"abcdef", &b)), Err(QueueError::Full));
    assert_eq!((q.count(), q.size()), (1, 6));
    assert!(q.size() <= 8);

    assert_eq!(q.pop(), Some(&a));
    assert_eq!(q.push(Message::new(b"abcdef", &b)), Ok(6));
    assert!(q.size() <= 8);
}
