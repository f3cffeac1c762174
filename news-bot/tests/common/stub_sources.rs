//! Scripted provider sources. Each stub answers every call with its current reply and records
//! the arguments it was called with.

use async_trait::async_trait;
use news_providers::{
    Article, NewsSource, ProviderError, Quote, QuoteSource, Result, WeatherReport, WeatherSource,
};
use std::sync::Mutex;

/// Reply a stub gives. `ProviderError` is not `Clone`, so failures are described here and
/// built fresh per call.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Reply<T> {
    Ok(T),
    Transport(u16),
    Malformed,
    Empty,
}

impl<T: Clone> Reply<T> {
    fn produce(&self, provider: &'static str) -> Result<T> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Transport(status) => Err(ProviderError::Transport {
                provider,
                status: *status,
            }),
            Reply::Malformed => Err(ProviderError::malformed(provider, "missing field `url`")),
            Reply::Empty => Err(ProviderError::EmptyResult { provider }),
        }
    }
}

pub fn articles(n: usize, tag: &str) -> Vec<Article> {
    (1..=n)
        .map(|i| Article {
            title: format!("{} {}", tag, i),
            description: format!("About {} {}", tag, i),
            url: format!("https://news.example/{}/{}", tag, i),
            image_url: if i % 2 == 0 {
                String::new()
            } else {
                format!("https://img.example/{}/{}.png", tag, i)
            },
        })
        .collect()
}

pub struct StubNews {
    reply: Mutex<Reply<Vec<Article>>>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl StubNews {
    pub fn new(reply: Reply<Vec<Article>>) -> Self {
        Self {
            reply: Mutex::new(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, reply: Reply<Vec<Article>>) {
        *self.reply.lock().unwrap() = reply;
    }

    /// `everything:<q>` / `headlines:<country>` per call.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NewsSource for StubNews {
    async fn everything(&self, query: &str) -> Result<Vec<Article>> {
        self.calls.lock().unwrap().push(format!("everything:{}", query));
        self.reply.lock().unwrap().produce("news")
    }

    async fn top_headlines(&self, country: &str) -> Result<Vec<Article>> {
        self.calls.lock().unwrap().push(format!("headlines:{}", country));
        self.reply.lock().unwrap().produce("news")
    }
}

pub fn sample_weather() -> WeatherReport {
    WeatherReport {
        city: "Chisinau".to_string(),
        description: "scattered clouds".to_string(),
        temp: 17.4,
        temp_min: 15.0,
        temp_max: 19.2,
        humidity: 63,
        wind_speed: 3.1,
    }
}

pub struct StubWeather {
    reply: Reply<WeatherReport>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl StubWeather {
    pub fn new(reply: Reply<WeatherReport>) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherSource for StubWeather {
    async fn current(&self, city: &str) -> Result<WeatherReport> {
        self.calls.lock().unwrap().push(city.to_string());
        self.reply.produce("weather")
    }
}

pub fn sample_quote() -> Quote {
    Quote {
        text: "The secret of getting ahead is getting started.".to_string(),
        author: "Mark Twain".to_string(),
    }
}

pub struct StubQuotes {
    reply: Reply<Quote>,
}

impl StubQuotes {
    pub fn new(reply: Reply<Quote>) -> Self {
        Self { reply }
    }
}

#[async_trait]
impl QuoteSource for StubQuotes {
    async fn random(&self) -> Result<Quote> {
        self.reply.produce("quote")
    }
}
