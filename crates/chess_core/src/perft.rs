use crate::rules::Rules;

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`, going
/// through the same apply/undo path the engines use.
pub fn perft<R: Rules>(pos: &mut R, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0u64;
    for mv in pos.legal_moves() {
        nodes += pos.probe(mv, |child| perft(child, depth - 1)).unwrap_or(0);
    }
    nodes
}
