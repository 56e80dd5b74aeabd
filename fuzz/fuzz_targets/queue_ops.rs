#![no_main]

use hopgraph_core::IndexedPriorityQueue;
use libfuzzer_sys::fuzz_target;

// Each 3-byte chunk is one operation: opcode, element, priority.
fuzz_target!(|data: &[u8]| {
    let mut queue = IndexedPriorityQueue::new();
    for op in data.chunks_exact(3) {
        let element = op[1] % 16;
        let priority = i64::from(op[2]) - 8;
        let _ = match op[0] % 3 {
            0 => queue.push(priority, element),
            1 => queue.pop().map(|_| ()),
            _ => queue.change_priority(priority, &element),
        };
        assert!(queue.is_consistent());
    }

    let mut last = i64::MIN;
    while let Ok((priority, _)) = queue.pop() {
        assert!(priority >= last);
        last = priority;
    }
});
