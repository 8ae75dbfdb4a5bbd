//! `inquire` autocomplete backed by the core type-ahead worker.
//!
//! The prompt calls [`Autocomplete::get_suggestions`] on every keystroke.
//! Inside a fast burst we answer from the cached batch and let results
//! trail the input; on a deliberate keystroke we give the worker a short
//! window to come back with fresh hits for exactly this generation.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use inquire::CustomUserError;
use inquire::autocompletion::{Autocomplete, Replacement};

use skycast_core::model::SearchHit;
use skycast_core::suggest::TypeAhead;

/// Budget for a deliberate keystroke to come back with fresh hits.
const SETTLED_WAIT: Duration = Duration::from_millis(450);

/// Keystrokes closer together than this count as a burst.
const FAST_TYPING: Duration = Duration::from_millis(120);

#[derive(Clone)]
pub struct CityCompleter {
    state: Arc<Mutex<CompleterState>>,
}

struct CompleterState {
    typeahead: TypeAhead,
    hits: Vec<SearchHit>,
    last_keystroke: Option<Instant>,
}

impl CityCompleter {
    pub fn new(typeahead: TypeAhead) -> Self {
        Self {
            state: Arc::new(Mutex::new(CompleterState {
                typeahead,
                hits: Vec::new(),
                last_keystroke: None,
            })),
        }
    }
}

fn display_line(hit: &SearchHit) -> String {
    format!("{}, {}, {}", hit.name, hit.region, hit.country)
}

impl Autocomplete for CityCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let state = &mut *guard;

        let generation = state.typeahead.submit(input);
        let burst = state.last_keystroke.is_some_and(|at| at.elapsed() < FAST_TYPING);
        state.last_keystroke = Some(Instant::now());

        let batch = if burst {
            state.typeahead.poll()
        } else {
            state.typeahead.wait_for(generation, SETTLED_WAIT)
        };
        if let Some(batch) = batch {
            state.hits = batch.hits.clone();
        }

        Ok(state.hits.iter().map(display_line).collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        let guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        // Accepting a hit fills in "Name, Country", which the weather
        // endpoints take back verbatim as a query.
        Ok(highlighted_suggestion.and_then(|line| {
            guard.hits.iter().find(|hit| display_line(hit) == line).map(SearchHit::label)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use skycast_core::WeatherError;
    use skycast_core::model::{Weather, WeatherForecast};
    use skycast_core::provider::WeatherSource;

    #[derive(Debug)]
    struct CannedSearch;

    #[async_trait]
    impl WeatherSource for CannedSearch {
        async fn current(&self, _query: &str) -> Result<Weather, WeatherError> {
            panic!("not used")
        }

        async fn forecast(&self, _query: &str, _days: u8) -> Result<WeatherForecast, WeatherError> {
            panic!("not used")
        }

        async fn search(&self, query: &str) -> Result<Vec<SearchHit>, WeatherError> {
            Ok(vec![SearchHit {
                id: 7,
                name: query.to_string(),
                region: "Region".to_string(),
                country: "Country".to_string(),
                lat: 1.0,
                lon: 2.0,
                url: String::new(),
            }])
        }
    }

    // One prompt keystroke normally settles within SETTLED_WAIT; retry a few
    // times so a starved runner does not fail the test.
    fn settled_suggestions(completer: &mut CityCompleter, input: &str) -> Vec<String> {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            let suggestions = completer.get_suggestions(input).unwrap();
            if !suggestions.is_empty() || Instant::now() > deadline {
                return suggestions;
            }
            std::thread::sleep(Duration::from_millis(300));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn settled_keystroke_gets_fresh_suggestions() {
        let mut completer = CityCompleter::new(TypeAhead::spawn(Arc::new(CannedSearch)));

        let suggestions = settled_suggestions(&mut completer, "Lima");

        assert_eq!(suggestions, vec!["Lima, Region, Country".to_string()]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn accepting_a_line_completes_to_name_and_country() {
        let mut completer = CityCompleter::new(TypeAhead::spawn(Arc::new(CannedSearch)));

        settled_suggestions(&mut completer, "Lima");

        let replacement = completer
            .get_completion("Lima", Some("Lima, Region, Country".to_string()))
            .unwrap();
        assert_eq!(replacement, Some("Lima, Country".to_string()));

        let none = completer.get_completion("Lima", None).unwrap();
        assert_eq!(none, None);
    }
}
