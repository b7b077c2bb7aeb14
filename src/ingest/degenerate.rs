//! IUPAC degenerate consensus of equal-length primers.

const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Groups sequences by length, keeping the order in which lengths first appear.
pub fn cluster_by_length<'a>(sequences: &[&'a str]) -> Vec<Vec<&'a str>> {
    let mut clusters: Vec<Vec<&'a str>> = Vec::new();
    for &seq in sequences {
        match clusters.iter().position(|c| c[0].len() == seq.len()) {
            Some(i) => clusters[i].push(seq),
            None => clusters.push(vec![seq]),
        }
    }
    clusters
}

/// Collapses same-length primers into one sequence, column by column, with
/// Cavener's rules: a dominant base is kept as is, otherwise the smallest set
/// of top-ranked bases covering the column is written as its IUPAC code.
pub fn degenerate_consensus(sequences: &[&str]) -> Result<String, String> {
    let length = match sequences.first() {
        Some(first) => first.len(),
        None => return Ok(String::new()),
    };
    if let Some(odd) = sequences.iter().find(|s| s.len() != length) {
        return Err(format!("primer '{odd}' differs in length from its cluster"));
    }

    let mut consensus = String::with_capacity(length);
    for column in 0..length {
        let mut counts = [0usize; 4];
        for seq in sequences {
            let base = seq.as_bytes()[column].to_ascii_uppercase();
            match BASES.iter().position(|b| *b == base) {
                Some(slot) => counts[slot] += 1,
                None => {
                    return Err(format!(
                        "primer '{seq}' has non-ACGT base '{}' at position {}",
                        base as char,
                        column + 1
                    ))
                }
            }
        }
        consensus.push(column_code(counts));
    }
    Ok(consensus)
}

fn column_code(counts: [usize; 4]) -> char {
    // stable sort keeps A, C, G, T order among equal counts
    let mut ranked = [0usize, 1, 2, 3];
    ranked.sort_by(|a, b| counts[*b].cmp(&counts[*a]));
    let c: Vec<usize> = ranked.iter().map(|i| counts[*i]).collect();
    let total: usize = c.iter().sum();

    let chosen: &[usize] = if c[0] > c[1] + c[2] + c[3] && c[0] > 2 * c[1] {
        &ranked[..1]
    } else if 4 * (c[0] + c[1]) > 3 * total {
        &ranked[..2]
    } else if c[3] == 0 {
        &ranked[..3]
    } else {
        &ranked[..]
    };

    let mut mask = 0u8;
    for slot in chosen {
        mask |= 1 << slot;
    }
    iupac_code(mask)
}

/// Bit 0 = A, 1 = C, 2 = G, 3 = T.
fn iupac_code(mask: u8) -> char {
    match mask {
        0b0001 => 'A',
        0b0010 => 'C',
        0b0100 => 'G',
        0b1000 => 'T',
        0b0011 => 'M',
        0b0101 => 'R',
        0b1001 => 'W',
        0b0110 => 'S',
        0b1010 => 'Y',
        0b1100 => 'K',
        0b0111 => 'V',
        0b1011 => 'H',
        0b1101 => 'D',
        0b1110 => 'B',
        _ => 'N',
    }
}
