use serde::{Deserialize, Serialize};

/// ResourceKind is a category of monitored cloud resource.
/// Each kind carries the static metadata its alarms are built from:
/// its document sections, metric namespace, identifying dimension,
/// and the vocabulary of metrics the platform publishes for it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Lambda,
    Table,
    Account,
    Cluster,
    ApiGateway,
    Cloudfront,
    RdsInstance,
    EksCluster,
    LogGroup,
    AppSyncApi,
    SqsQueue,
}

impl ResourceKind {
    pub const ALL: &'static [ResourceKind] = &[
        ResourceKind::Lambda,
        ResourceKind::Table,
        ResourceKind::Account,
        ResourceKind::Cluster,
        ResourceKind::ApiGateway,
        ResourceKind::Cloudfront,
        ResourceKind::RdsInstance,
        ResourceKind::EksCluster,
        ResourceKind::LogGroup,
        ResourceKind::AppSyncApi,
        ResourceKind::SqsQueue,
    ];

    /// Key of this kind's per-resource section of the document.
    /// The account kind is configured through defaults only.
    pub fn section_key(&self) -> Option<&'static str> {
        match self {
            Self::Lambda => Some("lambdas"),
            Self::Table => Some("tables"),
            Self::Account => None,
            Self::Cluster => Some("clusters"),
            Self::ApiGateway => Some("routes"),
            Self::Cloudfront => Some("distributions"),
            Self::RdsInstance => Some("rdsInstances"),
            Self::EksCluster => Some("eksClusters"),
            Self::LogGroup => Some("logGroups"),
            Self::AppSyncApi => Some("appSyncApis"),
            Self::SqsQueue => Some("sqsQueues"),
        }
    }

    /// Key of this kind's template under `custom.default`.
    pub fn defaults_key(&self) -> &'static str {
        match self {
            Self::Lambda => "lambda",
            Self::Table => "table",
            Self::Account => "account",
            Self::Cluster => "cluster",
            Self::ApiGateway => "apiGateway",
            Self::Cloudfront => "cloudfront",
            Self::RdsInstance => "rdsInstance",
            Self::EksCluster => "eksCluster",
            Self::LogGroup => "logGroup",
            Self::AppSyncApi => "appSyncApi",
            Self::SqsQueue => "sqsQueue",
        }
    }

    /// Short name used in generated stack names.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Lambda => "lambda",
            Self::Table => "table",
            Self::Account => "account",
            Self::Cluster => "cluster",
            Self::ApiGateway => "api-gateway",
            Self::Cloudfront => "cloudfront",
            Self::RdsInstance => "rds-instance",
            Self::EksCluster => "eks-cluster",
            Self::LogGroup => "log-group",
            Self::AppSyncApi => "appsync",
            Self::SqsQueue => "sqs",
        }
    }

    /// Namespace of this kind's metrics.
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::Lambda => "AWS/Lambda",
            Self::Table | Self::Account => "AWS/DynamoDB",
            Self::Cluster => "AWS/ECS",
            Self::ApiGateway => "AWS/ApiGateway",
            Self::Cloudfront => "AWS/CloudFront",
            Self::RdsInstance => "AWS/RDS",
            Self::EksCluster => "AWS/EKS",
            Self::LogGroup => "Custom",
            Self::AppSyncApi => "AWS/AppSync",
            Self::SqsQueue => "AWS/SQS",
        }
    }

    /// Dimension which identifies one resource of this kind.
    /// Account metrics are account-global and carry no dimension,
    /// and log-group metrics are extracted by per-group metric filters.
    pub fn dimension_key(&self) -> Option<&'static str> {
        match self {
            Self::Lambda => Some("FunctionName"),
            Self::Table => Some("TableName"),
            Self::Account => None,
            Self::Cluster | Self::EksCluster => Some("ClusterName"),
            Self::ApiGateway => Some("ApiName"),
            Self::Cloudfront => Some("DistributionId"),
            Self::RdsInstance => Some("DBInstanceIdentifier"),
            Self::LogGroup => None,
            Self::AppSyncApi => Some("GraphQLAPIId"),
            Self::SqsQueue => Some("QueueName"),
        }
    }

    /// Count of deployable-unit slots every monitored resource of this kind
    /// consumes regardless of its alarm count. Log groups carry the metric
    /// filter infrastructure which extracts their metrics.
    pub fn unit_overhead(&self) -> u32 {
        match self {
            Self::LogGroup => 1,
            _ => 0,
        }
    }

    /// Metric vocabulary published by the platform for this kind.
    /// Log groups have no built-in vocabulary: their metrics are declared
    /// by the configuration itself.
    pub fn metrics(&self) -> &'static [&'static str] {
        match self {
            Self::Lambda => LAMBDA_METRICS,
            Self::Table => TABLE_METRICS,
            Self::Account => ACCOUNT_METRICS,
            Self::Cluster => CLUSTER_METRICS,
            Self::ApiGateway => API_GATEWAY_METRICS,
            Self::Cloudfront => CLOUDFRONT_METRICS,
            Self::RdsInstance => RDS_METRICS,
            Self::EksCluster => EKS_METRICS,
            Self::LogGroup => &[],
            Self::AppSyncApi => APP_SYNC_METRICS,
            Self::SqsQueue => SQS_METRICS,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

pub const LAMBDA_METRICS: &[&str] = &[
    "Invocations",
    "Errors",
    "DeadLetterErrors",
    "DestinationDeliveryFailures",
    "Throttles",
    "ProvisionedConcurrencyInvocations",
    "ProvisionedConcurrencySpilloverInvocations",
    "Duration",
    "IteratorAge",
    "ConcurrencyExecutions",
    "ProvisionedConcurrencyExecutions",
    "ProvisionedConcurrencyUtilizations",
    "UnreservedConcurrentExecutions",
];

pub const TABLE_METRICS: &[&str] = &[
    "ConditionalCheckFailedRequests",
    "ConsumedReadCapacityUnits",
    "ConsumedWriteCapacityUnits",
    "MaxProvisionedTableReadCapacityUtilization",
    "MaxProvisionedTableWriteCapacityUtilization",
    "OnlineIndexConsumedWriteCapacity",
    "OnlineIndexPercentageProgress",
    "OnlineIndexThrottleEvents",
    "PendingReplicationCount",
    "ProvisionedReadCapacity",
    "ProvisionedWriteCapacity",
    "ReadThrottleEvents",
    "ReplicationLatency",
    "ReturnedBytes",
    "ReturnedItemCount",
    "ReturnedRecordsCount",
    "SystemErrors",
    "TimeToLiveDeletedItemCount",
    "ThrottledRequests",
    "TransactionConflict",
    "WriteThrottleEvents",
];

pub const ACCOUNT_METRICS: &[&str] = &[
    "AccountMaxReads",
    "AccountMaxTableLevelReads",
    "AccountMaxTableLevelWrites",
    "AccountMaxWrites",
    "AccountProvisionedReadCapacityUtilization",
    "AccountProvisionedWriteCapacityUtilization",
    "UserErrors",
];

pub const CLUSTER_METRICS: &[&str] = &[
    "CPUReservation",
    "CPUUtilization",
    "MemoryReservation",
    "MemoryUtilization",
    "GPUReservation",
];

pub const API_GATEWAY_METRICS: &[&str] = &[
    "4XXError",
    "5XXError",
    "CacheHitCount",
    "CacheMissCount",
    "Count",
    "IntegrationLatency",
    "Latency",
];

pub const CLOUDFRONT_METRICS: &[&str] = &[
    "4XXErrorRate",
    "5XXErrorRate",
    "401ErrorRate",
    "403ErrorRate",
    "404ErrorRate",
    "502ErrorRate",
    "503ErrorRate",
    "504ErrorRate",
    "BytesDownloaded",
    "BytesUploaded",
    "CacheHitRate",
    "OriginLatency",
    "Requests",
    "TotalErrorRate",
];

pub const RDS_METRICS: &[&str] = &[
    "BinLogDiskUsage",
    "BurstBalance",
    "CPUUtilization",
    "CPUCreditUsage",
    "CPUCreditBalance",
    "DatabaseConnections",
    "DiskQueueDepth",
    "FailedSQLServerAgentJobsCount",
    "FreeableMemory",
    "FreeStorageSpace",
    "MaximumUsedTransactionIDs",
    "NetworkReceiveThroughput",
    "NetworkTransmitThroughput",
    "OldestReplicationSlotLag",
    "ReadIOPS",
    "ReadLatency",
    "ReadThroughput",
    "ReplicaLag",
    "ReplicationSlotDiskUsage",
    "SwapUsage",
    "TransactionLogsDiskUsage",
    "TransactionLogsGeneration",
    "WriteIOPS",
    "WriteLatency",
    "WriteThroughput",
];

pub const EKS_METRICS: &[&str] = &[
    "cluster_failed_node_count",
    "cluster_node_count",
    "namespace_number_of_running_pods",
    "node_cpu_limit",
    "node_cpu_reserved_capacity",
    "node_cpu_usage_total",
    "node_cpu_utilization",
    "node_filesystem_utilization",
    "node_memory_limit",
    "node_memory_reserved_capacity",
    "node_memory_utilization",
    "node_memory_working_set",
    "node_network_total_bytes",
    "node_number_of_running_containers",
    "node_number_of_running_pods",
    "pod_cpu_reserved_capacity",
    "pod_cpu_utilization",
    "pod_cpu_utilization_over_pod_limit",
    "pod_memory_reserved_capacity",
    "pod_memory_utilization",
    "pod_memory_utilization_over_pod_limit",
    "pod_number_of_container_restarts",
    "pod_network_rx_bytes",
    "pod_network_tx_bytes",
    "service_number_of_running_pods",
];

pub const APP_SYNC_METRICS: &[&str] = &[
    "4XXError",
    "5XXError",
    "Latency",
    "ConnectSuccess",
    "ConnectClientError",
    "ConnectServerError",
    "DisconnectSuccess",
    "DisconnectClientError",
    "DisconnectServerError",
    "SubscribeSuccess",
    "SubscribeClientError",
    "SubscribeServerError",
    "UnsubscribeSuccess",
    "UnsubscribeClientError",
    "UnsubscribeServerError",
    "PublishDataMessageSuccess",
    "PublishDataMessageClientError",
    "PublishDataMessageServerError",
    "PublishDataMessageSize",
    "ActiveConnection",
    "ActiveSubscription",
    "ConnectionDuration",
];

pub const SQS_METRICS: &[&str] = &[
    "ApproximateAgeOfOldestMessage",
    "ApproximateNumberOfMessagesDelayed",
    "ApproximateNumberOfMessagesNotVisible",
    "ApproximateNumberOfMessagesVisible",
    "NumberOfEmptyReceives",
    "NumberOfMessagesDeleted",
    "NumberOfMessagesReceived",
    "NumberOfMessagesSent",
    "SentMessageSize",
];
