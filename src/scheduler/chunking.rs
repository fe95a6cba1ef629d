//! Room chunking for coverage duties.
//!
//! Reliever and squad duties each cover a contiguous group of rooms.
//! Rooms are split into near-equal groups with the remainder front-loaded:
//! 7 rooms over 3 people gives group sizes 3, 2, 2.

/// Splits `rooms` into exactly `people` groups (empty if `people == 0`).
///
/// Group sizes differ by at most one and sum to `rooms.len()`. Room order
/// is preserved. With no rooms, `people` empty groups are returned.
pub fn chunk_rooms(rooms: &[String], people: usize) -> Vec<Vec<String>> {
    if people == 0 {
        return Vec::new();
    }
    if rooms.is_empty() {
        return vec![Vec::new(); people];
    }

    let base = rooms.len() / people;
    let extra = rooms.len() % people;

    let mut chunks = Vec::with_capacity(people);
    let mut start = 0;
    for i in 0..people {
        let size = base + usize::from(i < extra);
        chunks.push(rooms[start..start + size].to_vec());
        start += size;
    }
    chunks
}
