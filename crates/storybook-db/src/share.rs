use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of the public share-id token. 62^10 possibilities makes
/// collisions against the UNIQUE constraint practically impossible.
const SHARE_ID_LEN: usize = 10;

pub fn new_share_id() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(SHARE_ID_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_ids_are_alphanumeric_and_sized() {
        let id = new_share_id();
        assert_eq!(id.len(), SHARE_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn share_ids_differ() {
        assert_ne!(new_share_id(), new_share_id());
    }
}
