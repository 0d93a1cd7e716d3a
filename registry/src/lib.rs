use std::sync::Arc;

use adapter::client::flight::FlightProviderClientImpl;
use adapter::database::ConnectionPool;
use adapter::redis::RedisClient;
use adapter::repository::{
    auth::AuthRepositoryImpl, flight_booking::FlightBookingRepositoryImpl,
    health::HealthCheckRepositoryImpl, hotel_booking::HotelBookingRepositoryImpl,
    itinerary::ItineraryRepositoryImpl, notification::NotificationRepositoryImpl,
    room_type::RoomTypeRepositoryImpl, user::UserRepositoryImpl,
};
use kernel::client::flight::FlightProviderClient;
use kernel::repository::{
    auth::AuthRepository, flight_booking::FlightBookingRepository, health::HealthCheckRepository,
    hotel_booking::HotelBookingRepository, itinerary::ItineraryRepository,
    notification::NotificationRepository, room_type::RoomTypeRepository, user::UserRepository,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    user_repository: Arc<dyn UserRepository>,
    room_type_repository: Arc<dyn RoomTypeRepository>,
    hotel_booking_repository: Arc<dyn HotelBookingRepository>,
    flight_booking_repository: Arc<dyn FlightBookingRepository>,
    itinerary_repository: Arc<dyn ItineraryRepository>,
    notification_repository: Arc<dyn NotificationRepository>,
    flight_provider_client: Arc<dyn FlightProviderClient>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let room_type_repository = Arc::new(RoomTypeRepositoryImpl::new(pool.clone()));
        let hotel_booking_repository = Arc::new(HotelBookingRepositoryImpl::new(pool.clone()));
        let flight_booking_repository = Arc::new(FlightBookingRepositoryImpl::new(pool.clone()));
        let itinerary_repository = Arc::new(ItineraryRepositoryImpl::new(pool.clone()));
        let notification_repository = Arc::new(NotificationRepositoryImpl::new(pool.clone()));
        let flight_provider_client =
            Arc::new(FlightProviderClientImpl::new(&app_config.flight_provider));
        Self {
            health_check_repository,
            auth_repository,
            user_repository,
            room_type_repository,
            hotel_booking_repository,
            flight_booking_repository,
            itinerary_repository,
            notification_repository,
            flight_provider_client,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn room_type_repository(&self) -> Arc<dyn RoomTypeRepository> {
        self.room_type_repository.clone()
    }

    pub fn hotel_booking_repository(&self) -> Arc<dyn HotelBookingRepository> {
        self.hotel_booking_repository.clone()
    }

    pub fn flight_booking_repository(&self) -> Arc<dyn FlightBookingRepository> {
        self.flight_booking_repository.clone()
    }

    pub fn itinerary_repository(&self) -> Arc<dyn ItineraryRepository> {
        self.itinerary_repository.clone()
    }

    pub fn notification_repository(&self) -> Arc<dyn NotificationRepository> {
        self.notification_repository.clone()
    }

    pub fn flight_provider_client(&self) -> Arc<dyn FlightProviderClient> {
        self.flight_provider_client.clone()
    }
}
