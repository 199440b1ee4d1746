use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::ProfileImage).string())
                    .col(ColumnDef::new(Users::About).text())
                    .col(ColumnDef::new(Users::Location).string())
                    .col(ColumnDef::new(Users::Website).string())
                    .col(ColumnDef::new(Users::Role).string().not_null().default("USER"))
                    .col(ColumnDef::new(Users::Reputation).integer().not_null().default(1))
                    .col(ColumnDef::new(Users::Views).integer().not_null().default(0))
                    .col(ColumnDef::new(Users::Points).integer().not_null().default(0))
                    .col(ColumnDef::new(Users::Level).integer().not_null().default(1))
                    .col(ColumnDef::new(Users::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Users::IsBanned).boolean().not_null().default(false))
                    .col(ColumnDef::new(Users::BannedUntil).timestamp_with_time_zone())
                    .col(ColumnDef::new(Users::BanReason).string())
                    .col(ColumnDef::new(Users::EmailVerified).boolean().not_null().default(false))
                    .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        // Create user_groups table (before questions, which reference it)
        manager
            .create_table(
                Table::create()
                    .table(UserGroups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserGroups::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(UserGroups::Name).string().not_null())
                    .col(ColumnDef::new(UserGroups::Description).text())
                    .col(ColumnDef::new(UserGroups::CreatorId).big_integer().not_null())
                    .col(ColumnDef::new(UserGroups::CreatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_groups_creator_id")
                            .from(UserGroups::Table, UserGroups::CreatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create questions table
        // accepted_answer_id carries no FK: it would be circular with answers.
        // The answer-delete workflow keeps it consistent.
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Questions::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Questions::Title).string().not_null())
                    .col(ColumnDef::new(Questions::Body).text().not_null())
                    .col(ColumnDef::new(Questions::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(Questions::Views).integer().not_null().default(0))
                    .col(ColumnDef::new(Questions::Votes).integer().not_null().default(0))
                    .col(ColumnDef::new(Questions::AnswerCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Questions::IsPinned).boolean().not_null().default(false))
                    .col(ColumnDef::new(Questions::IsLocked).boolean().not_null().default(false))
                    .col(ColumnDef::new(Questions::IsApproved).boolean().not_null().default(false))
                    .col(ColumnDef::new(Questions::AcceptedAnswerId).big_integer())
                    .col(ColumnDef::new(Questions::GroupId).big_integer())
                    .col(ColumnDef::new(Questions::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Questions::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_questions_author_id")
                            .from(Questions::Table, Questions::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_questions_group_id")
                            .from(Questions::Table, Questions::GroupId)
                            .to(UserGroups::Table, UserGroups::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_questions_author_id")
                    .table(Questions::Table)
                    .col(Questions::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_questions_is_approved")
                    .table(Questions::Table)
                    .col(Questions::IsApproved)
                    .to_owned(),
            )
            .await?;

        // Create answers table
        manager
            .create_table(
                Table::create()
                    .table(Answers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Answers::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Answers::Body).text().not_null())
                    .col(ColumnDef::new(Answers::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(Answers::QuestionId).big_integer().not_null())
                    .col(ColumnDef::new(Answers::Votes).integer().not_null().default(0))
                    .col(ColumnDef::new(Answers::IsAccepted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Answers::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Answers::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_answers_author_id")
                            .from(Answers::Table, Answers::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_answers_question_id")
                            .from(Answers::Table, Answers::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_answers_question_id")
                    .table(Answers::Table)
                    .col(Answers::QuestionId)
                    .to_owned(),
            )
            .await?;

        // Create comments table
        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Comments::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Comments::Body).string().not_null())
                    .col(ColumnDef::new(Comments::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(Comments::QuestionId).big_integer())
                    .col(ColumnDef::new(Comments::AnswerId).big_integer())
                    .col(ColumnDef::new(Comments::IsApproved).boolean().not_null().default(true))
                    .col(ColumnDef::new(Comments::IsDeleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Comments::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Comments::UpdatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_author_id")
                            .from(Comments::Table, Comments::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_question_id")
                            .from(Comments::Table, Comments::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_answer_id")
                            .from(Comments::Table, Comments::AnswerId)
                            .to(Answers::Table, Answers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create tags table
        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tags::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Tags::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Tags::QuestionCount).integer().not_null().default(0))
                    .col(ColumnDef::new(Tags::CreatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        // Create question_tags join table
        manager
            .create_table(
                Table::create()
                    .table(QuestionTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(QuestionTags::QuestionId).big_integer().not_null())
                    .col(ColumnDef::new(QuestionTags::TagId).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(QuestionTags::QuestionId)
                            .col(QuestionTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_tags_question_id")
                            .from(QuestionTags::Table, QuestionTags::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_tags_tag_id")
                            .from(QuestionTags::Table, QuestionTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create question_votes membership table
        // The composite primary key is the duplicate-vote guard.
        manager
            .create_table(
                Table::create()
                    .table(QuestionVotes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(QuestionVotes::UserId).big_integer().not_null())
                    .col(ColumnDef::new(QuestionVotes::QuestionId).big_integer().not_null())
                    .col(ColumnDef::new(QuestionVotes::CreatedAt).timestamp_with_time_zone().not_null())
                    .primary_key(
                        Index::create()
                            .col(QuestionVotes::UserId)
                            .col(QuestionVotes::QuestionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_votes_user_id")
                            .from(QuestionVotes::Table, QuestionVotes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_votes_question_id")
                            .from(QuestionVotes::Table, QuestionVotes::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create answer_votes membership table
        manager
            .create_table(
                Table::create()
                    .table(AnswerVotes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AnswerVotes::UserId).big_integer().not_null())
                    .col(ColumnDef::new(AnswerVotes::AnswerId).big_integer().not_null())
                    .col(ColumnDef::new(AnswerVotes::CreatedAt).timestamp_with_time_zone().not_null())
                    .primary_key(
                        Index::create()
                            .col(AnswerVotes::UserId)
                            .col(AnswerVotes::AnswerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_answer_votes_user_id")
                            .from(AnswerVotes::Table, AnswerVotes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_answer_votes_answer_id")
                            .from(AnswerVotes::Table, AnswerVotes::AnswerId)
                            .to(Answers::Table, Answers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create user_follows table
        manager
            .create_table(
                Table::create()
                    .table(UserFollows::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserFollows::FollowerId).big_integer().not_null())
                    .col(ColumnDef::new(UserFollows::FollowingId).big_integer().not_null())
                    .col(ColumnDef::new(UserFollows::CreatedAt).timestamp_with_time_zone().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserFollows::FollowerId)
                            .col(UserFollows::FollowingId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_follows_follower_id")
                            .from(UserFollows::Table, UserFollows::FollowerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_follows_following_id")
                            .from(UserFollows::Table, UserFollows::FollowingId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create group_members table
        manager
            .create_table(
                Table::create()
                    .table(GroupMembers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GroupMembers::GroupId).big_integer().not_null())
                    .col(ColumnDef::new(GroupMembers::UserId).big_integer().not_null())
                    .col(ColumnDef::new(GroupMembers::JoinedAt).timestamp_with_time_zone().not_null())
                    .primary_key(
                        Index::create()
                            .col(GroupMembers::GroupId)
                            .col(GroupMembers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_members_group_id")
                            .from(GroupMembers::Table, GroupMembers::GroupId)
                            .to(UserGroups::Table, UserGroups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_members_user_id")
                            .from(GroupMembers::Table, GroupMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(GroupMembers::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(UserFollows::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(AnswerVotes::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(QuestionVotes::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(QuestionTags::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Tags::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Comments::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Answers::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Questions::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(UserGroups::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    ProfileImage,
    About,
    Location,
    Website,
    Role,
    Reputation,
    Views,
    Points,
    Level,
    IsActive,
    IsBanned,
    BannedUntil,
    BanReason,
    EmailVerified,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Questions {
    Table,
    Id,
    Title,
    Body,
    AuthorId,
    Views,
    Votes,
    AnswerCount,
    IsPinned,
    IsLocked,
    IsApproved,
    AcceptedAnswerId,
    GroupId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Answers {
    Table,
    Id,
    Body,
    AuthorId,
    QuestionId,
    Votes,
    IsAccepted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    Body,
    AuthorId,
    QuestionId,
    AnswerId,
    IsApproved,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Name,
    QuestionCount,
    CreatedAt,
}

#[derive(DeriveIden)]
enum QuestionTags {
    Table,
    QuestionId,
    TagId,
}

#[derive(DeriveIden)]
enum QuestionVotes {
    Table,
    UserId,
    QuestionId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AnswerVotes {
    Table,
    UserId,
    AnswerId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserFollows {
    Table,
    FollowerId,
    FollowingId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserGroups {
    Table,
    Id,
    Name,
    Description,
    CreatorId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum GroupMembers {
    Table,
    GroupId,
    UserId,
    JoinedAt,
}
