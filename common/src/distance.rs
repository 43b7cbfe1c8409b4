//! 編集距離（レーベンシュタイン距離）
//!
//! 置換・挿入・削除のコストはすべて1。長さは文字（char）単位で数える。

/// レーベンシュタイン距離を計算
///
/// (len(a)+1) × (len(b)+1) の DP テーブルを全て埋める。
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            matrix[i][j] = if a_chars[i - 1] == b_chars[j - 1] {
                matrix[i - 1][j - 1]
            } else {
                1 + matrix[i - 1][j]
                    .min(matrix[i][j - 1])
                    .min(matrix[i - 1][j - 1])
            };
        }
    }

    matrix[a_len][b_len]
}

/// 距離から類似度を計算: `1 - distance / max(len(a), len(b))`
///
/// 両方空文字なら 1.0。
pub fn similarity_from_distance(distance: usize, a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    1.0 - (distance as f64 / max_len as f64)
}

/// 類似度を計算（編集距離ベース）
pub fn similarity(a: &str, b: &str) -> f64 {
    similarity_from_distance(levenshtein_distance(a, b), a, b)
}
