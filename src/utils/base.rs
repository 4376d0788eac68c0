//! Basic helpers on lists.

/// Lower-case every string of a list.
pub fn lower_list<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items.iter().map(|item| item.as_ref().to_lowercase()).collect()
}

/// Flatten a list of lists into a single list, keeping the order of the elements.
pub fn flatten<I>(lst: I) -> Vec<<I::Item as IntoIterator>::Item>
where
    I: IntoIterator,
    I::Item: IntoIterator,
{
    lst.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_list() {
        assert_eq!(lower_list(&["Mean", "MEDIAN", "nanmean"]), vec!["mean", "median", "nanmean"]);
        assert_eq!(lower_list::<&str>(&[]), Vec::<String>::new());
    }

    #[test]
    fn test_flatten() {
        let trials = vec![vec![0.1, 0.5], vec![], vec![0.2, 0.3, 0.9]];
        assert_eq!(flatten(trials), vec![0.1, 0.5, 0.2, 0.3, 0.9]);

        // colors repeated once per spike of each trial
        let colors = flatten([("red", 2), ("blue", 1)].iter().map(|&(col, n)| vec![col; n]));
        assert_eq!(colors, vec!["red", "red", "blue"]);

        assert!(flatten(Vec::<Vec<f64>>::new()).is_empty());
    }
}
