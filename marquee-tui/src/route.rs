use std::fmt;

/// Navigation routes, one per view.
///
/// Fragments (`#movies`, `#showtime/3`, ...) parse through an explicit
/// finite table so string handling stays decoupled from rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Movies,
    Showtimes,
    Profile,
    Movie(i64),
    Showtime(i64),
    Reservation(i64),
    Payment(i64),
}

impl Route {
    /// The view shown for empty or unrecognized fragments.
    pub fn default_route() -> Self {
        Route::Movies
    }

    /// Parse a navigation fragment, with or without the leading `#`.
    /// Unrecognized input falls back to the default route.
    pub fn parse(fragment: &str) -> Self {
        let fragment = fragment.trim().trim_start_matches('#');

        match fragment {
            "movies" => return Route::Movies,
            "showtimes" => return Route::Showtimes,
            "profile" => return Route::Profile,
            _ => {}
        }

        if let Some((prefix, id)) = fragment.split_once('/') {
            if let Ok(id) = id.parse::<i64>() {
                match prefix {
                    "movie" => return Route::Movie(id),
                    "showtime" => return Route::Showtime(id),
                    "reservation" => return Route::Reservation(id),
                    "payment" => return Route::Payment(id),
                    _ => {}
                }
            }
        }

        Route::default_route()
    }

    /// Whether this route needs an authenticated session to render.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Profile | Route::Reservation(_) | Route::Payment(_)
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Movies => write!(f, "#movies"),
            Route::Showtimes => write!(f, "#showtimes"),
            Route::Profile => write!(f, "#profile"),
            Route::Movie(id) => write!(f, "#movie/{}", id),
            Route::Showtime(id) => write!(f, "#showtime/{}", id),
            Route::Reservation(id) => write!(f, "#reservation/{}", id),
            Route::Payment(id) => write!(f, "#payment/{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_static_fragments() {
        assert_eq!(Route::parse("#movies"), Route::Movies);
        assert_eq!(Route::parse("showtimes"), Route::Showtimes);
        assert_eq!(Route::parse("#profile"), Route::Profile);
    }

    #[test]
    fn parses_parameterized_fragments() {
        assert_eq!(Route::parse("#movie/7"), Route::Movie(7));
        assert_eq!(Route::parse("#showtime/3"), Route::Showtime(3));
        assert_eq!(Route::parse("reservation/12"), Route::Reservation(12));
        assert_eq!(Route::parse("#payment/12"), Route::Payment(12));
    }

    #[test]
    fn unknown_fragments_fall_back_to_movies() {
        assert_eq!(Route::parse(""), Route::Movies);
        assert_eq!(Route::parse("#"), Route::Movies);
        assert_eq!(Route::parse("#login"), Route::Movies);
        assert_eq!(Route::parse("#movie/abc"), Route::Movies);
        assert_eq!(Route::parse("#seat/9"), Route::Movies);
    }

    #[test]
    fn display_round_trips() {
        for route in [
            Route::Movies,
            Route::Showtimes,
            Route::Profile,
            Route::Movie(7),
            Route::Showtime(3),
            Route::Reservation(12),
            Route::Payment(12),
        ] {
            assert_eq!(Route::parse(&route.to_string()), route);
        }
    }

    #[test]
    fn auth_required_routes() {
        assert!(Route::Profile.requires_auth());
        assert!(Route::Reservation(1).requires_auth());
        assert!(Route::Payment(1).requires_auth());
        assert!(!Route::Movies.requires_auth());
        assert!(!Route::Showtime(1).requires_auth());
    }
}
