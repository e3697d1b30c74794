//! The stdin query: two coordinates and, for timed objectives, a clock time.

use anyhow::{Context, Result};

use mm_core::{parse_clock, Coordinate};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Query {
    pub source:      Coordinate,
    pub destination: Coordinate,
    /// Departure in minutes after midnight; 0 for untimed objectives.
    pub depart:      f64,
}

/// Parse `src_lon src_lat dst_lon dst_lat [clock]`, whitespace separated.
///
/// The clock is read only when `timed`; it may contain a space before the
/// meridiem (`8:10 am`).  A clock that is missing or does not parse means
/// midnight.
pub fn parse_query(text: &str, timed: bool) -> Result<Query> {
    let mut tokens = text.split_whitespace();
    let mut number = |what: &str| -> Result<f64> {
        let tok = tokens.next().with_context(|| format!("missing {what}"))?;
        tok.parse().with_context(|| format!("{what} {tok:?} is not a number"))
    };

    let source = Coordinate::new(number("source longitude")?, number("source latitude")?);
    let destination = Coordinate::new(number("destination longitude")?, number("destination latitude")?);

    let depart = if timed {
        let clock = tokens.collect::<Vec<_>>().join(" ");
        if clock.is_empty() {
            log::warn!("no departure time given; leaving at midnight");
        }
        parse_clock(&clock)
    } else {
        0.0
    };

    Ok(Query { source, destination, depart })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untimed() {
        let q = parse_query("90.40 23.80\n90.42 23.81\n", false).unwrap();
        assert_eq!(q.source, Coordinate::new(90.40, 23.80));
        assert_eq!(q.destination, Coordinate::new(90.42, 23.81));
        assert_eq!(q.depart, 0.0);
    }

    #[test]
    fn timed() {
        let q = parse_query("90.40 23.80 90.42 23.81 8:10am", true).unwrap();
        assert_eq!(q.depart, 490.0);
        let q = parse_query("90.40 23.80 90.42 23.81 12:30 PM", true).unwrap();
        assert_eq!(q.depart, 750.0);
        let q = parse_query("90.40 23.80 90.42 23.81 soon", true).unwrap();
        assert_eq!(q.depart, 0.0);
    }

    #[test]
    fn errors() {
        assert!(parse_query("90.40 23.80 90.42", false).is_err());
        assert!(parse_query("90.40 north 90.42 23.81", false).is_err());
    }

    #[test]
    fn missing_clock_means_midnight() {
        let q = parse_query("90.40 23.80 90.42 23.81\n", true).unwrap();
        assert_eq!(q.depart, 0.0);
        assert_eq!(q.destination, Coordinate::new(90.42, 23.81));
    }
}
