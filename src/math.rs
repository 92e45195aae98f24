/// Implementation of the Kahan-Babushka-Neumaier algorithm for reduced numerical error in summation
///
/// <https://en.wikipedia.org/wiki/Kahan_summation_algorithm#Further_enhancements>
pub fn kbn_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum: f64 = 0.;
    let mut compensation: f64 = 0.;
    for input in values {
        let t = sum + input;
        compensation += if sum.abs() >= input.abs() {
            (sum - t) + input
        } else {
            (input - t) + sum
        };
        sum = t;
    }
    sum + compensation
}

#[cfg(test)]
#[test]
fn test_summation() {
    let input = [0.1; 10];
    let out = kbn_sum(input);

    assert_ne!(input.iter().sum::<f64>(), out);
    assert_eq!(out, 1.)
}

#[cfg(test)]
#[test]
fn test_summation_recovers_small_terms() {
    let out = kbn_sum([1., 1e100, 1., -1e100]);
    assert_eq!(out, 2.);
    assert_eq!(kbn_sum(std::iter::empty()), 0.);
}
